//! # fractal-geometry
//!
//! Koch/Cesàro-family fractal curves grown from decorated seed polygons and
//! rasterized to RGBA images.
//!
//! A seed shape (3-, 6- or 7-gon) is a list of integer triangles. Every
//! triangle edge is subdivided `N` times: each step replaces a segment with
//! four children whose middle pair bends out to an apex, so generation
//! `k` holds `4^k` segments per edge. The shape parameter `offset` controls
//! where the two anchors sit and which way the apex points.
//!
//! ## Pipeline
//!
//! 1. **Seed catalog**: integer seed triangles for a polygon and radius
//! 2. **Subdivision**: per-edge generation histories plus a global extent
//! 3. **Canvas**: size a square canvas from the extent, then replay the
//!    history as polygon fills and lines through a [`Surface`]
//! 4. **Surface**: aliased scanline fill and Bresenham lines on an RGBA
//!    buffer, encoded as PNG or BMP
//!
//! ```no_run
//! use fractal_geometry::{ComposeParams, Composer, OutputFormat};
//!
//! let params = ComposeParams { polygon_count: 6, iterations: 5, ..Default::default() };
//! let composition = Composer::new(params).compose()?;
//! composition.save(std::path::Path::new("."), OutputFormat::Png)?;
//! # Ok::<(), fractal_geometry::Error>(())
//! ```

// Foundation types
pub mod basics;
pub mod color;
pub mod error;

// Geometry
pub mod seed_catalog;
pub mod weierstrass;

// Rasterization
pub mod dda_line;
pub mod rasterizer_scanline;
pub mod renderer_base;
pub mod rendering_buffer;
pub mod surface;

// Composition and entry
pub mod canvas;
pub mod config;
pub mod identifier;

pub use basics::{Point, Segment};
pub use canvas::{
    canvas_geometry, compose, draw, CanvasGeometry, ComposeParams, Composer, Composition,
    CurvePlan, DrawStats,
};
pub use color::{ColorTable, Rgba8};
pub use config::FractalConfig;
pub use error::{Error, Result};
pub use identifier::Identifier;
pub use seed_catalog::{seed_triangles, PolygonCount, SeedShape, SeedTriangle};
pub use surface::{OutputFormat, PrimitiveRecorder, RasterSurface, Surface};
pub use weierstrass::{subdivide, Extent, GenerationHistory, SplitParams, Subdivider};
