//! Color types and the per-iteration color table.
//!
//! - `Rgba8`: u8 components, non-premultiplied, copied verbatim into the
//!   output surface (no blending).
//! - `ColorTable`: maps an iteration index to the color used for every
//!   primitive drawn at that depth. Index 0 is the seed triangle fill.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Deep azure used as the default seed fill.
    pub const AZURE: Rgba8 = Rgba8::new(18, 80, 123, 255);

    /// Pale cloud grey, the light counterpart of [`Rgba8::AZURE`].
    pub const CLOUD: Rgba8 = Rgba8::new(234, 238, 241, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

// ============================================================================
// ColorTable
// ============================================================================

/// Iteration index to color. Missing indices fall back to the caller's
/// background color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: BTreeMap<usize, Rgba8>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, iteration: usize, color: Rgba8) -> Self {
        self.colors.insert(iteration, color);
        self
    }

    pub fn insert(&mut self, iteration: usize, color: Rgba8) -> Option<Rgba8> {
        self.colors.insert(iteration, color)
    }

    #[inline]
    pub fn get(&self, iteration: usize, background: Rgba8) -> Rgba8 {
        self.colors.get(&iteration).copied().unwrap_or(background)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Rgba8)> + '_ {
        self.colors.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(usize, Rgba8)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (usize, Rgba8)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
