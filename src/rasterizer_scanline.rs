//! Aliased scanline polygon rasterizer.
//!
//! Polygon vertices are integer pixel centers. For every pixel row the
//! rasterizer intersects the row's center line with the polygon edges
//! (half-open in y, so shared vertices are counted once), sorts the
//! crossings and fills the pixels whose centers lie inside under the
//! non-zero winding rule. Spans are half-open in x as well, so the right and bottom
//! boundaries are left to the outline. Coverage is binary: a pixel is
//! either copied or untouched.
//!
//! The outline itself is not part of the fill. Callers that want boundary
//! pixels (including degenerate, zero-area polygons) stroke the outline
//! separately.

use crate::basics::Point;
use crate::color::Rgba8;
use crate::renderer_base::RendererBase;

#[derive(Debug, Clone, Copy)]
struct Edge {
    x1: f64,
    y1: i32,
    x2: f64,
    y2: i32,
}

impl Edge {
    /// Crossing with row `y` and the edge's winding direction, if the edge
    /// spans the row.
    #[inline]
    fn crossing(&self, y: i32) -> Option<(f64, i32)> {
        let (lo, hi, dir) = if self.y1 < self.y2 {
            (self.y1, self.y2, 1)
        } else {
            (self.y2, self.y1, -1)
        };
        if y < lo || y >= hi {
            return None;
        }
        let t = (y - self.y1) as f64 / (self.y2 - self.y1) as f64;
        Some((self.x1 + (self.x2 - self.x1) * t, dir))
    }
}

/// Reusable polygon rasterizer. Edge and crossing storage is kept between
/// polygons to avoid reallocating for every triangle.
#[derive(Debug, Default)]
pub struct RasterizerScanlineBin {
    edges: Vec<Edge>,
    crossings: Vec<(f64, i32)>,
    min_y: i32,
    max_y: i32,
}

impl RasterizerScanlineBin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.edges.clear();
        self.min_y = i32::MAX;
        self.max_y = i32::MIN;
    }

    /// Replace the current contents with a closed polygon.
    pub fn add_polygon(&mut self, points: &[Point]) {
        self.reset();
        for (i, &p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            self.min_y = self.min_y.min(p.y);
            self.max_y = self.max_y.max(p.y);
            if p.y != q.y {
                self.edges.push(Edge {
                    x1: p.x as f64,
                    y1: p.y,
                    x2: q.x as f64,
                    y2: q.y,
                });
            }
        }
    }

    /// Fill the polygon interior into `ren` with color `c`.
    pub fn render(&mut self, ren: &mut RendererBase, c: Rgba8) {
        if self.edges.is_empty() {
            return;
        }
        let clip = *ren.clip_box();
        let y_start = self.min_y.max(clip.y1);
        let y_end = self.max_y.min(clip.y2);

        for y in y_start..=y_end {
            self.crossings.clear();
            for edge in &self.edges {
                if let Some(cross) = edge.crossing(y) {
                    self.crossings.push(cross);
                }
            }
            self.crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
            self.fill_row(ren, y, c);
        }
    }

    fn fill_row(&self, ren: &mut RendererBase, y: i32, c: Rgba8) {
        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in &self.crossings {
            let was_inside = winding != 0;
            winding += dir;
            let now_inside = winding != 0;
            if !was_inside && now_inside {
                span_start = x;
            } else if was_inside && !now_inside {
                let x1 = span_start.ceil() as i32;
                let x2 = x.ceil() as i32 - 1;
                if x1 <= x2 {
                    ren.copy_hline(x1, y, x2, c);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
