//! Foundation types and rounding helpers.
//!
//! Every coordinate in the crate is an integer pixel offset from the shape
//! center. Real-valued trigonometry is converted with one of the two helpers
//! below, so the integer results are reproducible on every platform.

use core::ops::{Add, Sub};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, ties to even.
///
/// Used for every point produced by curve subdivision.
#[inline]
pub fn iround(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// Truncate toward zero.
///
/// Used for seed geometry derived from the polygon radius.
#[inline]
pub fn itrunc(v: f64) -> i32 {
    v.trunc() as i32
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Golden ratio minus one (1/φ).
pub const PHI_INV: f64 = 0.618_033_988_749_894_9;

/// Golden ratio φ.
pub const PHI: f64 = PHI_INV + 1.0;

/// Fourth root of two, the padding applied to non-minimized canvases.
pub const CANVAS_PADDING: f64 = 1.189_207_115_002_721;

// ============================================================================
// RectI
// ============================================================================

/// An integer rectangle with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

// ============================================================================
// Point
// ============================================================================

/// An integer point in shape space (origin at the shape center, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Largest absolute coordinate of this point.
    #[inline]
    pub fn magnitude(&self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Translate both coordinates by the same amount.
    #[inline]
    pub fn offset_by(&self, d: i32) -> Self {
        Self::new(self.x + d, self.y + d)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Segment
// ============================================================================

/// A directed segment. Subdivision preserves direction, so children chain
/// head-to-tail from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[inline]
    pub fn delta(&self) -> Point {
        self.end - self.start
    }

    /// Twice the signed area of the triangle (start, end, p).
    /// Zero when `p` is collinear with the segment.
    #[inline]
    pub fn cross(&self, p: Point) -> i64 {
        let d = self.delta();
        let v = p - self.start;
        d.x as i64 * v.y as i64 - d.y as i64 * v.x as i64
    }
}

// ============================================================================
// Tests
// ============================================================================
