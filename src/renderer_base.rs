//! Base renderer with clipping.
//!
//! Wraps a [`RenderingBuffer`] with a clip rectangle so callers can emit
//! signed coordinates freely; everything outside the box is dropped.

use crate::basics::RectI;
use crate::color::Rgba8;
use crate::rendering_buffer::RenderingBuffer;

pub struct RendererBase {
    rbuf: RenderingBuffer,
    clip_box: RectI,
}

impl RendererBase {
    /// The clip box is initialized to the full buffer extent.
    pub fn new(rbuf: RenderingBuffer) -> Self {
        let clip_box = Self::full_box(&rbuf);
        Self { rbuf, clip_box }
    }

    fn full_box(rbuf: &RenderingBuffer) -> RectI {
        RectI::new(0, 0, rbuf.width() as i32 - 1, rbuf.height() as i32 - 1)
    }

    pub fn width(&self) -> u32 {
        self.rbuf.width()
    }

    pub fn height(&self) -> u32 {
        self.rbuf.height()
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    pub fn rbuf(&self) -> &RenderingBuffer {
        &self.rbuf
    }

    pub fn into_rbuf(self) -> RenderingBuffer {
        self.rbuf
    }

    /// Copy a single pixel (clipped).
    #[inline]
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: Rgba8) {
        if self.inbox(x, y) {
            self.rbuf.copy_pixel(x as u32, y as u32, c);
        }
    }

    /// Copy a horizontal run `x1..=x2` on row `y` (clipped).
    pub fn copy_hline(&mut self, mut x1: i32, y: i32, mut x2: i32, c: Rgba8) {
        if x1 > x2 {
            core::mem::swap(&mut x1, &mut x2);
        }
        if y < self.clip_box.y1 || y > self.clip_box.y2 {
            return;
        }
        if x1 > self.clip_box.x2 || x2 < self.clip_box.x1 {
            return;
        }
        let x1 = x1.max(self.clip_box.x1);
        let x2 = x2.min(self.clip_box.x2);
        self.rbuf.copy_hline(x1 as u32, y as u32, x2 as u32, c);
    }
}

// ============================================================================
// Tests
// ============================================================================
