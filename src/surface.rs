//! Drawing surfaces.
//!
//! [`Surface`] is the narrow interface the composer draws through: fill a
//! polygon, draw a line. [`RasterSurface`] implements it on an RGBA pixel
//! buffer without anti-aliasing and encodes the result through the `image`
//! crate. [`PrimitiveRecorder`] implements it by recording the calls, which
//! is what the tests use to check draw order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basics::Point;
use crate::color::Rgba8;
use crate::dda_line::LineBresenhamInterpolator;
use crate::error::{Error, Result};
use crate::rasterizer_scanline::RasterizerScanlineBin;
use crate::renderer_base::RendererBase;
use crate::rendering_buffer::RenderingBuffer;

// ============================================================================
// Surface trait
// ============================================================================

pub trait Surface {
    /// Fill a closed polygon. Fewer than three points draw nothing.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8);

    /// Draw a line with both end points included.
    fn draw_line(&mut self, p0: Point, p1: Point, color: Rgba8);
}

// ============================================================================
// OutputFormat
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            other => Err(Error::Config(format!("unknown output format '{other}'"))),
        }
    }
}

// ============================================================================
// RasterSurface
// ============================================================================

/// Aliased RGBA raster. Polygon fills cover the interior plus the outline,
/// so zero-area polygons still leave their edges on the canvas.
pub struct RasterSurface {
    ren: RendererBase,
    ras: RasterizerScanlineBin,
    background: Rgba8,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        Self {
            ren: RendererBase::new(RenderingBuffer::new(width, height, background)),
            ras: RasterizerScanlineBin::new(),
            background,
        }
    }

    /// Fails with [`Error::CanvasTooLarge`] when the pixel buffer cannot be
    /// allocated.
    pub fn try_new(width: u32, height: u32, background: Rgba8) -> Result<Self> {
        let rbuf = RenderingBuffer::try_new(width, height, background).ok_or(
            Error::CanvasTooLarge {
                side: width.max(height) as u64,
            },
        )?;
        Ok(Self {
            ren: RendererBase::new(rbuf),
            ras: RasterizerScanlineBin::new(),
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }

    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Pixel at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        Some(self.ren.rbuf().pixel(x as u32, y as u32))
    }

    /// Raw RGBA bytes, row-major, top-to-bottom.
    pub fn as_bytes(&self) -> &[u8] {
        self.ren.rbuf().as_bytes()
    }

    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        let (w, h) = (self.width(), self.height());
        image::RgbaImage::from_raw(w, h, self.ren.into_rbuf().into_vec())
    }

    fn stroke(&mut self, p0: Point, p1: Point, color: Rgba8) {
        for p in LineBresenhamInterpolator::new(p0, p1).pixels() {
            self.ren.copy_pixel(p.x, p.y, color);
        }
    }

    /// Encode with an explicit format.
    pub fn save_with_format(&self, path: &Path, format: OutputFormat) -> Result<()> {
        image::save_buffer_with_format(
            path,
            self.as_bytes(),
            self.width(),
            self.height(),
            image::ExtendedColorType::Rgba8,
            format.image_format(),
        )?;
        Ok(())
    }

    /// Encode, picking the format from the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .parse::<OutputFormat>()?;
        self.save_with_format(path, format)
    }
}

impl Surface for RasterSurface {
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        if points.len() < 3 {
            return;
        }
        self.ras.add_polygon(points);
        self.ras.render(&mut self.ren, color);
        for (i, &p) in points.iter().enumerate() {
            self.stroke(p, points[(i + 1) % points.len()], color);
        }
    }

    fn draw_line(&mut self, p0: Point, p1: Point, color: Rgba8) {
        self.stroke(p0, p1, color);
    }
}

// ============================================================================
// PrimitiveRecorder
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Fill { points: Vec<Point>, color: Rgba8 },
    Line { p0: Point, p1: Point, color: Rgba8 },
}

/// Surface that keeps every call instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveRecorder {
    pub primitives: Vec<Primitive>,
}

impl PrimitiveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fills(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Fill { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.primitives.len() - self.fills()
    }
}

impl Surface for PrimitiveRecorder {
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        self.primitives.push(Primitive::Fill {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, p0: Point, p1: Point, color: Rgba8) {
        self.primitives.push(Primitive::Line { p0, p1, color });
    }
}

// ============================================================================
// Tests
// ============================================================================
