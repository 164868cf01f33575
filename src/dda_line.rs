//! Integer line interpolation for aliased line drawing.
//!
//! [`Dda2LineInterpolator`] spreads an integer delta over a number of steps
//! with Bresenham-style remainder tracking. [`LineBresenhamInterpolator`]
//! walks the major axis of a line one pixel at a time and uses the DDA for
//! the minor axis, so both end points are hit exactly.

use crate::basics::Point;

// ============================================================================
// DDA2 line interpolator (Bresenham-style integer)
// ============================================================================

/// Integer DDA that reaches `y2` exactly after `count` forward steps,
/// distributing the rounding error evenly.
#[derive(Debug, Clone)]
pub struct Dda2LineInterpolator {
    cnt: i32,
    lft: i32,
    rem: i32,
    mod_val: i32,
    y: i32,
}

impl Dda2LineInterpolator {
    pub fn new(y1: i32, y2: i32, count: i32) -> Self {
        let cnt = count.max(1);
        let mut lft = (y2 - y1) / cnt;
        let mut rem = (y2 - y1) % cnt;
        let mut mod_val = rem;

        if mod_val <= 0 {
            mod_val += cnt;
            rem += cnt;
            lft -= 1;
        }
        mod_val -= cnt;

        Self {
            cnt,
            lft,
            rem,
            mod_val,
            y: y1,
        }
    }

    /// Step forward one unit.
    #[inline]
    pub fn inc(&mut self) {
        self.mod_val += self.rem;
        self.y += self.lft;
        if self.mod_val > 0 {
            self.mod_val -= self.cnt;
            self.y += 1;
        }
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }
}

// ============================================================================
// Bresenham line interpolator
// ============================================================================

/// Pixel-by-pixel walk from one integer point to another.
#[derive(Debug, Clone)]
pub struct LineBresenhamInterpolator {
    major: i32,
    ver: bool,
    len: u32,
    inc: i32,
    interpolator: Dda2LineInterpolator,
}

impl LineBresenhamInterpolator {
    pub fn new(p1: Point, p2: Point) -> Self {
        let ver = (p2.x - p1.x).abs() < (p2.y - p1.y).abs();
        let (major1, major2, minor1, minor2) = if ver {
            (p1.y, p2.y, p1.x, p2.x)
        } else {
            (p1.x, p2.x, p1.y, p2.y)
        };
        let len = (major2 - major1).unsigned_abs();
        let inc = if major2 > major1 { 1 } else { -1 };

        Self {
            major: major1,
            ver,
            len,
            inc,
            interpolator: Dda2LineInterpolator::new(minor1, minor2, len as i32),
        }
    }

    #[inline]
    pub fn current(&self) -> Point {
        if self.ver {
            Point::new(self.interpolator.y(), self.major)
        } else {
            Point::new(self.major, self.interpolator.y())
        }
    }

    #[inline]
    pub fn step(&mut self) {
        self.interpolator.inc();
        self.major += self.inc;
    }

    /// Every pixel of the line, both end points included.
    pub fn pixels(self) -> LinePixels {
        LinePixels {
            remaining: self.len + 1,
            li: self,
        }
    }
}

/// Iterator returned by [`LineBresenhamInterpolator::pixels`].
pub struct LinePixels {
    li: LineBresenhamInterpolator,
    remaining: u32,
}

impl Iterator for LinePixels {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let p = self.li.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.li.step();
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for LinePixels {}

// ============================================================================
// Tests
// ============================================================================
