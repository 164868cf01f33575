//! Seed shapes: the triangles whose edges start every curve.
//!
//! The 3- and 6-sided shapes are plain fans around the origin. The 7-sided
//! shape is a decorated rosette of 24 triangles: a seven-wedge central fan,
//! a crown at the top vertex, two pairs of side spikes and two six-triangle
//! fans hanging off the upper vertices. All of it is computed from the radius
//! with closed-form trigonometry, so the rosette scales with the radius.
//!
//! Coordinates are in image space (y grows downward) and truncated toward
//! zero. The winding of every triangle matters: the apex of each subdivided
//! edge is pushed to the side its winding dictates, so mirrored triangles are
//! emitted with their last two vertices swapped to keep the same winding.

use crate::basics::{itrunc, Point, Segment, PHI, PHI_INV, PI};
use crate::error::{Error, Result};

/// Largest accepted radius. Seed decorations reach about 2.4·r and the
/// subdivided curves stay under 3·r, so even the padded canvas side stays far
/// inside `i32`.
pub const MAX_RADIUS: i32 = 1 << 24;

// ============================================================================
// PolygonCount
// ============================================================================

/// The closed set of supported seed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonCount {
    Triangle,
    Hexagon,
    Heptagon,
}

impl PolygonCount {
    pub const ALL: [PolygonCount; 3] = [Self::Triangle, Self::Hexagon, Self::Heptagon];

    pub fn sides(self) -> u32 {
        match self {
            Self::Triangle => 3,
            Self::Hexagon => 6,
            Self::Heptagon => 7,
        }
    }

    /// Number of seed triangles the shape is made of.
    pub fn triangle_count(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Hexagon => 6,
            Self::Heptagon => 24,
        }
    }
}

impl TryFrom<u32> for PolygonCount {
    type Error = Error;

    fn try_from(n: u32) -> Result<Self> {
        match n {
            3 => Ok(Self::Triangle),
            6 => Ok(Self::Hexagon),
            7 => Ok(Self::Heptagon),
            _ => Err(Error::UnsupportedPolygonCount(n)),
        }
    }
}

// ============================================================================
// SeedTriangle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedTriangle(pub [Point; 3]);

impl SeedTriangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self([a, b, c])
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.0
    }

    /// Boundary segments in winding order: v0→v1, v1→v2, v2→v0.
    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.0;
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    /// Reflection across the vertical axis with the winding preserved.
    fn mirrored(&self) -> Self {
        let [a, b, c] = self.0.map(|p| Point::new(-p.x, p.y));
        Self::new(a, c, b)
    }
}

// ============================================================================
// SeedShape
// ============================================================================

/// The ordered triangles of one seed shape. Order is draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedShape {
    polygon: PolygonCount,
    radius: i32,
    triangles: Vec<SeedTriangle>,
}

impl SeedShape {
    pub fn new(polygon: PolygonCount, radius: i32) -> Result<Self> {
        if !(1..=MAX_RADIUS).contains(&radius) {
            return Err(Error::InvalidRadius(radius));
        }
        let triangles = match polygon {
            PolygonCount::Triangle => hexagon_fan(radius).into_iter().step_by(2).collect(),
            PolygonCount::Hexagon => hexagon_fan(radius),
            PolygonCount::Heptagon => heptagon_rosette(radius),
        };
        debug_assert_eq!(triangles.len(), polygon.triangle_count());
        Ok(Self {
            polygon,
            radius,
            triangles,
        })
    }

    pub fn polygon(&self) -> PolygonCount {
        self.polygon
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn triangles(&self) -> &[SeedTriangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeedTriangle> {
        self.triangles.iter()
    }
}

/// Look up the seed shape for a raw polygon count.
pub fn seed_triangles(polygon_count: u32, radius: i32) -> Result<SeedShape> {
    SeedShape::new(PolygonCount::try_from(polygon_count)?, radius)
}

// ============================================================================
// Geometry tables
// ============================================================================

/// `(trunc(r·cos(π·num/den)·scale), trunc(r·sin(π·num/den)·scale))`.
#[inline]
fn polar(radius: i32, num: f64, den: f64, scale: f64) -> Point {
    let angle = PI * num / den;
    let r = radius as f64;
    Point::new(itrunc(r * angle.cos() * scale), itrunc(r * angle.sin() * scale))
}

/// Triangles `(origin, rim[i], rim[i + 1])` closing back to `rim[0]`.
fn fan(rim: &[Point]) -> Vec<SeedTriangle> {
    (0..rim.len())
        .map(|i| SeedTriangle::new(Point::ORIGIN, rim[i], rim[(i + 1) % rim.len()]))
        .collect()
}

/// Six 60° wedges starting with the top one and turning clockwise on screen.
/// The triangle shape uses every other wedge.
fn hexagon_fan(radius: i32) -> Vec<SeedTriangle> {
    let p = polar(radius, 1.0, 3.0, 1.0);
    fan(&[
        Point::new(-p.x, -p.y),
        Point::new(p.x, -p.y),
        Point::new(radius, 0),
        Point::new(p.x, p.y),
        Point::new(-p.x, p.y),
        Point::new(-radius, 0),
    ])
}

fn heptagon_rosette(radius: i32) -> Vec<SeedTriangle> {
    // Rim of the central heptagon.
    let upper = polar(radius, 3.0, 14.0, 1.0);
    let middle = polar(radius, 1.0, 14.0, 1.0);
    let lower = polar(radius, 5.0, 14.0, 1.0);
    let top = Point::new(0, -radius);

    // Decorations, scaled by φ.
    let crown = polar(radius, 1.0, 3.0, PHI);
    let spike_up = polar(radius, 2.0, 21.0, PHI);
    let spike_down = polar(radius, 5.0, 21.0, PHI);
    let foot_out = polar(radius, 4.0, 21.0, PHI);
    let foot_in = polar(radius, 10.0, 21.0, PHI);

    // Upper fans, scaled by φ−1.
    let hub = polar(radius, 3.0, 14.0, PHI_INV);
    let rib_a = polar(radius, 19.0, 42.0, PHI_INV);
    let rib_b = polar(radius, 5.0, 42.0, PHI_INV);

    let mut triangles = fan(&[
        top,
        Point::new(upper.x, -upper.y),
        middle,
        lower,
        Point::new(-lower.x, lower.y),
        Point::new(-middle.x, middle.y),
        Point::new(-upper.x, -upper.y),
    ]);

    triangles.push(SeedTriangle::new(
        top,
        Point::new(-crown.x, -radius - crown.y),
        Point::new(crown.x, -radius - crown.y),
    ));

    let spike = SeedTriangle::new(
        middle,
        Point::new(middle.x + spike_up.x, middle.y - spike_up.y),
        Point::new(middle.x + spike_down.x, middle.y + spike_down.y),
    );
    triangles.extend([spike, spike.mirrored()]);

    let foot = SeedTriangle::new(
        lower,
        Point::new(lower.x + foot_out.x, lower.y + foot_out.y),
        Point::new(lower.x - foot_in.x, lower.y + foot_in.y),
    );
    triangles.extend([foot, foot.mirrored()]);

    // Six blades around a hub just outside the upper-right vertex. The blade
    // tips walk once around the hub, starting and ending on the rim vertex.
    let corner = Point::new(upper.x, -upper.y);
    let center = Point::new(upper.x + hub.x, -upper.y - hub.y);
    let tips = [
        corner,
        center + Point::new(rib_a.x, rib_a.y),
        center + Point::new(rib_b.x, rib_b.y),
        center + Point::new(hub.x, -hub.y),
        center + Point::new(-rib_a.x, -rib_a.y),
        center + Point::new(-rib_b.x, -rib_b.y),
    ];
    let blades: Vec<SeedTriangle> = (0..tips.len())
        .map(|i| SeedTriangle::new(center, tips[(i + 1) % tips.len()], tips[i]))
        .collect();
    let mirrored: Vec<SeedTriangle> = blades.iter().map(SeedTriangle::mirrored).collect();
    triangles.extend(blades);
    triangles.extend(mirrored);

    triangles
}

// ============================================================================
// Tests
// ============================================================================
