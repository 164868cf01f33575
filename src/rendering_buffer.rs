//! Rendering buffer: owned, row-oriented RGBA32 pixel storage.
//!
//! Rows are stored top-down with a positive stride of `width * 4` bytes,
//! component order R, G, B, A. Pixels are only ever copied (overwritten),
//! never blended, since the fractal renderer draws without anti-aliasing.

use crate::color::Rgba8;

const BPP: usize = 4; // bytes per pixel

pub struct RenderingBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderingBuffer {
    /// Allocate a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        let mut rbuf = Self {
            data: vec![0u8; width as usize * height as usize * BPP],
            width,
            height,
        };
        rbuf.clear(background);
        rbuf
    }

    /// Like [`new`](Self::new), but returns `None` instead of aborting when
    /// the buffer cannot be allocated.
    pub fn try_new(width: u32, height: u32, background: Rgba8) -> Option<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(BPP)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.resize(len, 0);
        let mut rbuf = Self {
            data,
            width,
            height,
        };
        rbuf.clear(background);
        Some(rbuf)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    /// Get a safe immutable slice for row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Get a safe mutable slice for row `y`.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Overwrite every pixel with `c`.
    pub fn clear(&mut self, c: Rgba8) {
        let px = c.to_array();
        for chunk in self.data.chunks_exact_mut(BPP) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Read the pixel at (x, y). Coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = x as usize * BPP;
        let row = self.row_slice(y);
        Rgba8::new(row[i], row[i + 1], row[i + 2], row[i + 3])
    }

    /// Overwrite the pixel at (x, y). Coordinates must be in range.
    #[inline]
    pub fn copy_pixel(&mut self, x: u32, y: u32, c: Rgba8) {
        let i = x as usize * BPP;
        self.row_slice_mut(y)[i..i + BPP].copy_from_slice(&c.to_array());
    }

    /// Overwrite pixels `x1..=x2` of row `y`. Coordinates must be in range.
    pub fn copy_hline(&mut self, x1: u32, y: u32, x2: u32, c: Rgba8) {
        let px = c.to_array();
        let row = self.row_slice_mut(y);
        for chunk in row[x1 as usize * BPP..(x2 as usize + 1) * BPP].chunks_exact_mut(BPP) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Raw RGBA bytes, row-major, top-to-bottom.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

// ============================================================================
// Tests
// ============================================================================
