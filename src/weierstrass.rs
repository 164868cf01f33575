//! Four-way segment subdivision ("weierstrass" step).
//!
//! Every step replaces a segment `P0→P1` with four chained segments
//! `P0→A→C→B→P1`, where `A` and `B` sit a fraction `radian` in from each end
//! and `C` is the midpoint pushed sideways by a distance proportional to the
//! segment length. The `offset` shape parameter controls both:
//!
//! ```text
//! radian = 1 / (2 + 2·|sin(π·offset/2)|)        ∈ [1/4, 1/2]
//! factor = ±radian                             (sign of offset, + for 0)
//! C      = mid(P0, P1) + factor·cos(π·radian/2)·(dy, −dx)
//! ```
//!
//! All new points are rounded to integers (ties to even) as soon as they are
//! produced, so repeated runs are bit-identical.
//!
//! A [`GenerationHistory`] records one seed segment's lineage: generation 0
//! is the seed alone, generation `k + 1` holds four segments per segment of
//! generation `k`. The running [`Extent`] is the largest absolute coordinate
//! seen so far and is used by the composer to size the canvas.

use crate::basics::{iround, Point, Segment, PI};
use crate::error::{Error, Result};

/// Depth beyond which the 4^N growth makes rendering impractically slow.
/// Deeper runs are allowed but logged.
pub const PRACTICAL_ITERATION_LIMIT: u32 = 12;

/// One generation of a lineage: segments chained head-to-tail.
pub type Generation = Vec<Segment>;

// ============================================================================
// Extent
// ============================================================================

/// Running maximum of absolute coordinates. Can only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Extent(i32);

impl Extent {
    pub fn new(initial: i32) -> Self {
        Self(initial.max(0))
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Grow to cover both coordinates of `p`.
    #[inline]
    pub fn include(&mut self, p: Point) {
        self.0 = self.0.max(p.magnitude());
    }

    /// Max-reduction of two extents.
    #[inline]
    pub fn merge(self, other: Extent) -> Extent {
        self.max(other)
    }
}

// ============================================================================
// SplitParams / Split
// ============================================================================

/// Split coefficients derived from the `offset` shape parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParams {
    offset: f64,
    radian: f64,
    factor: f64,
    cos_half: f64,
}

impl SplitParams {
    /// Rejects non-finite offsets; every finite offset yields
    /// `radian ∈ [0.25, 0.5]`.
    pub fn from_offset(offset: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(Error::InvalidOffset(offset));
        }
        let radian = 1.0 / (2.0 + (PI * offset * 0.5).sin().abs() * 2.0);
        let factor = if offset >= 0.0 { radian } else { -radian };
        Ok(Self {
            offset,
            radian,
            factor,
            cos_half: (PI * radian * 0.5).cos(),
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Fractional distance of the anchors from each end.
    pub fn radian(&self) -> f64 {
        self.radian
    }

    /// Signed apex coefficient; its sign picks the side of the apex.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Split one segment into its two anchors and apex.
    pub fn split(&self, segment: Segment) -> Split {
        let Segment { start: p0, end: p1 } = segment;
        let dx = (p1.x - p0.x) as f64;
        let dy = (p1.y - p0.y) as f64;

        let anchor_a = Point::new(
            iround(p0.x as f64 + dx * self.radian),
            iround(p0.y as f64 + dy * self.radian),
        );
        let anchor_b = Point::new(
            iround(p1.x as f64 - dx * self.radian),
            iround(p1.y as f64 - dy * self.radian),
        );
        let apex = Point::new(
            iround((p0.x + p1.x) as f64 * 0.5 + dy * self.cos_half * self.factor),
            iround((p0.y + p1.y) as f64 * 0.5 - dx * self.cos_half * self.factor),
        );

        Split {
            segment,
            anchor_a,
            apex,
            anchor_b,
        }
    }
}

/// The three points inserted into `segment` by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Split {
    pub segment: Segment,
    pub anchor_a: Point,
    pub apex: Point,
    pub anchor_b: Point,
}

impl Split {
    /// The four replacement segments in traversal order.
    pub fn children(&self) -> [Segment; 4] {
        let Segment { start, end } = self.segment;
        [
            Segment::new(start, self.anchor_a),
            Segment::new(self.anchor_a, self.apex),
            Segment::new(self.apex, self.anchor_b),
            Segment::new(self.anchor_b, end),
        ]
    }

    /// Triangle `(A, C, B)` filled on top of the parent segment.
    pub fn cap(&self) -> [Point; 3] {
        [self.anchor_a, self.apex, self.anchor_b]
    }

    /// Fold the inserted points into `extent`. The end points were already
    /// covered when their own generation was produced.
    #[inline]
    pub fn widen(&self, extent: &mut Extent) {
        extent.include(self.anchor_a);
        extent.include(self.anchor_b);
        extent.include(self.apex);
    }
}

/// Produce the next generation from `current`, widening `extent`.
pub fn step(params: &SplitParams, current: &[Segment], extent: &mut Extent) -> Generation {
    let mut next = Vec::with_capacity(current.len() * 4);
    for &segment in current {
        let split = params.split(segment);
        split.widen(extent);
        next.extend_from_slice(&split.children());
    }
    next
}

// ============================================================================
// GenerationHistory
// ============================================================================

/// All generations of one seed segment, from the seed through the requested
/// depth. Built once; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationHistory {
    params: SplitParams,
    generations: Vec<Generation>,
}

impl GenerationHistory {
    /// Grow the lineage of `seed` to `iterations` steps.
    pub fn build(
        params: SplitParams,
        seed: Segment,
        iterations: u32,
        extent: &mut Extent,
    ) -> Self {
        let mut generations: Vec<Generation> = Vec::with_capacity(iterations as usize + 1);
        generations.push(vec![seed]);
        for _ in 0..iterations {
            let next = match generations.last() {
                Some(last) => step(&params, last, extent),
                None => break,
            };
            generations.push(next);
        }
        Self {
            params,
            generations,
        }
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    pub fn seed(&self) -> Segment {
        self.generations[0][0]
    }

    /// Number of subdivision steps recorded (generations minus one).
    pub fn iterations(&self) -> u32 {
        (self.generations.len() - 1) as u32
    }

    pub fn generation(&self, k: usize) -> Option<&[Segment]> {
        self.generations.get(k).map(Vec::as_slice)
    }

    pub fn final_generation(&self) -> &[Segment] {
        self.generations.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn generations(&self) -> impl Iterator<Item = &[Segment]> {
        self.generations.iter().map(Vec::as_slice)
    }

    /// Total segments over every generation.
    pub fn segment_count(&self) -> usize {
        self.generations.iter().map(Vec::len).sum()
    }

    /// Splits applied to generation `k` to produce generation `k + 1`.
    /// Empty for the final generation.
    pub fn splits(&self, k: usize) -> impl Iterator<Item = Split> + '_ {
        let segments = if k + 1 < self.generations.len() {
            self.generations[k].as_slice()
        } else {
            &[]
        };
        segments.iter().map(move |&s| self.params.split(s))
    }
}

// ============================================================================
// Subdivider
// ============================================================================

/// Subdivides lists of seed segments with fixed split parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivider {
    params: SplitParams,
}

impl Subdivider {
    pub fn new(offset: f64) -> Result<Self> {
        Ok(Self {
            params: SplitParams::from_offset(offset)?,
        })
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    /// One history per seed segment, in input order, plus the widened extent.
    pub fn subdivide(
        &self,
        seeds: &[Segment],
        iterations: u32,
        extent: Extent,
    ) -> (Vec<GenerationHistory>, Extent) {
        if iterations > PRACTICAL_ITERATION_LIMIT {
            tracing::warn!(
                iterations,
                limit = PRACTICAL_ITERATION_LIMIT,
                "subdivision depth grows as 4^n per seed edge"
            );
        }
        let mut extent = extent;
        let histories: Vec<GenerationHistory> = seeds
            .iter()
            .map(|&seed| GenerationHistory::build(self.params, seed, iterations, &mut extent))
            .collect();
        tracing::debug!(
            seeds = seeds.len(),
            iterations,
            segments = histories.iter().map(GenerationHistory::segment_count).sum::<usize>(),
            extent = extent.value(),
            "weierstrass"
        );
        (histories, extent)
    }
}

/// Convenience wrapper around [`Subdivider`].
pub fn subdivide(
    seeds: &[Segment],
    offset: f64,
    iterations: u32,
    extent: Extent,
) -> Result<(Vec<GenerationHistory>, Extent)> {
    Ok(Subdivider::new(offset)?.subdivide(seeds, iterations, extent))
}

// ============================================================================
// Tests
// ============================================================================
