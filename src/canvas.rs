//! Canvas composition: seed shape → subdivision → sized canvas → draw calls.
//!
//! Composition runs in two phases. [`Composer::plan`] looks up the seed
//! shape and subdivides the three edges of every seed triangle, folding all
//! of it into one global [`Extent`]. [`draw`] then replays the plan onto a
//! [`Surface`] strictly in triangle-then-iteration order:
//!
//! 1. the seed triangle, filled with color 0;
//! 2. for each iteration `i` in `1..=N`, every segment of generation `i − 1`
//!    gets its cap `(A, C, B)` filled and its base line drawn in color `i`.
//!
//! Later iterations therefore paint over earlier ones. Signed shape
//! coordinates are shifted by the canvas margin into pixel space.

use std::path::{Path, PathBuf};

use crate::basics::{Point, CANVAS_PADDING};
use crate::color::{ColorTable, Rgba8};
use crate::error::{Error, Result};
use crate::identifier::{Identifier, SerialParameters};
use crate::seed_catalog::{seed_triangles, SeedShape, SeedTriangle};
use crate::surface::{OutputFormat, RasterSurface, Surface};
use crate::weierstrass::{Extent, GenerationHistory, Subdivider};

/// Algorithm name used in output identifiers.
pub const ALGORITHM: &str = "weierstrass";

/// Radius used when none (or zero) is given.
pub const DEFAULT_RADIUS: i32 = 512;

// ============================================================================
// ComposeParams
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeParams {
    pub polygon_count: u32,
    pub offset: f64,
    pub iterations: u32,
    /// Zero selects [`DEFAULT_RADIUS`].
    pub radius: i32,
    /// Skip the 2^(1/4) padding around the curve.
    pub minimize: bool,
}

impl Default for ComposeParams {
    fn default() -> Self {
        Self {
            polygon_count: 7,
            offset: -1.0 / 3.0,
            iterations: 9,
            radius: DEFAULT_RADIUS,
            minimize: false,
        }
    }
}

impl ComposeParams {
    pub fn effective_radius(&self) -> i32 {
        if self.radius == 0 {
            DEFAULT_RADIUS
        } else {
            self.radius
        }
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::new(
            ALGORITHM,
            &SerialParameters {
                offset: self.offset,
                iterations: self.iterations,
                radius: self.effective_radius(),
                minimize: self.minimize,
            },
        )
    }
}

// ============================================================================
// CurvePlan
// ============================================================================

/// One seed triangle and the histories of its three edges.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCurves {
    pub triangle: SeedTriangle,
    pub histories: Vec<GenerationHistory>,
}

/// Everything needed to draw, computed before any pixel is touched.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePlan {
    shape: SeedShape,
    curves: Vec<TriangleCurves>,
    extent: Extent,
    iterations: u32,
}

impl CurvePlan {
    pub fn shape(&self) -> &SeedShape {
        &self.shape
    }

    pub fn curves(&self) -> &[TriangleCurves] {
        &self.curves
    }

    /// Largest absolute coordinate over seeds and every inserted point.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn segment_count(&self) -> usize {
        self.curves
            .iter()
            .flat_map(|c| c.histories.iter())
            .map(GenerationHistory::segment_count)
            .sum()
    }
}

// ============================================================================
// Canvas sizing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    /// Translation from shape space to pixel space on both axes.
    pub margin: i32,
    /// Width and height of the square canvas, `2·margin + 1`.
    pub side: u32,
}

/// Fails with [`Error::CanvasTooLarge`] when the side does not fit in `i32`.
pub fn canvas_geometry(extent: Extent, minimize: bool) -> Result<CanvasGeometry> {
    let margin = if minimize {
        extent.value() as i64
    } else {
        (extent.value() as f64 * CANVAS_PADDING).trunc() as i64
    };
    let side = 2 * margin + 1;
    if side > i32::MAX as i64 {
        return Err(Error::CanvasTooLarge { side: side as u64 });
    }
    Ok(CanvasGeometry {
        margin: margin as i32,
        side: side as u32,
    })
}

// ============================================================================
// Drawing
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub fills: usize,
    pub lines: usize,
}

impl DrawStats {
    pub fn primitives(&self) -> usize {
        self.fills + self.lines
    }
}

/// Replay `plan` onto `surface`, shifting every point by `margin`.
pub fn draw<S: Surface>(
    plan: &CurvePlan,
    margin: i32,
    colors: &ColorTable,
    background: Rgba8,
    surface: &mut S,
) -> DrawStats {
    let mut stats = DrawStats::default();
    let shift = |p: Point| p.offset_by(margin);

    for curves in &plan.curves {
        let seed = curves.triangle.vertices().map(shift);
        surface.fill_polygon(&seed, colors.get(0, background));
        stats.fills += 1;

        for iteration in 1..=plan.iterations as usize {
            let color = colors.get(iteration, background);
            for history in &curves.histories {
                for split in history.splits(iteration - 1) {
                    surface.fill_polygon(&split.cap().map(shift), color);
                    surface.draw_line(shift(split.segment.start), shift(split.segment.end), color);
                    stats.fills += 1;
                    stats.lines += 1;
                }
            }
        }
    }
    stats
}

// ============================================================================
// Composer
// ============================================================================

/// A finished canvas and what it took to make it.
pub struct Composition {
    pub surface: RasterSurface,
    pub geometry: CanvasGeometry,
    pub extent: Extent,
    pub stats: DrawStats,
    pub identifier: Identifier,
}

impl Composition {
    /// Write `<identifier>.<ext>` into `dir` and return its path.
    pub fn save(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
        let path = dir.join(self.identifier.file_name(format.extension()));
        self.surface.save_with_format(&path, format)?;
        tracing::info!(path = %path.display(), "finish fractal geometries");
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct Composer {
    params: ComposeParams,
    colors: ColorTable,
    background: Rgba8,
}

impl Composer {
    /// Seed fill in azure, everything else in a transparent background.
    pub fn new(params: ComposeParams) -> Self {
        Self {
            params,
            colors: ColorTable::new().with(0, Rgba8::AZURE),
            background: Rgba8::TRANSPARENT,
        }
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    pub fn params(&self) -> &ComposeParams {
        &self.params
    }

    /// Seed lookup and subdivision of every triangle edge.
    pub fn plan(&self) -> Result<CurvePlan> {
        let radius = self.params.effective_radius();
        let shape = seed_triangles(self.params.polygon_count, radius)?;
        let subdivider = Subdivider::new(self.params.offset)?;

        let mut extent = Extent::new(radius);
        for triangle in shape.iter() {
            for &v in triangle.vertices() {
                extent.include(v);
            }
        }

        let mut curves = Vec::with_capacity(shape.len());
        for &triangle in shape.iter() {
            let (histories, widened) =
                subdivider.subdivide(&triangle.edges(), self.params.iterations, extent);
            extent = extent.merge(widened);
            curves.push(TriangleCurves {
                triangle,
                histories,
            });
        }

        let plan = CurvePlan {
            shape,
            curves,
            extent,
            iterations: self.params.iterations,
        };
        tracing::info!(
            triangles = plan.shape.len(),
            segments = plan.segment_count(),
            extent = extent.value(),
            "weierstrass"
        );
        Ok(plan)
    }

    pub fn compose(&self) -> Result<Composition> {
        tracing::info!(
            polygon = self.params.polygon_count,
            offset = self.params.offset,
            iterations = self.params.iterations,
            radius = self.params.effective_radius(),
            minimize = self.params.minimize,
            "begin fractal geometries"
        );
        let plan = self.plan()?;

        let geometry = canvas_geometry(plan.extent(), self.params.minimize)?;
        tracing::info!(side = geometry.side, "canvas geometries");

        let mut surface = RasterSurface::try_new(geometry.side, geometry.side, self.background)?;
        let stats = draw(
            &plan,
            geometry.margin,
            &self.colors,
            self.background,
            &mut surface,
        );
        tracing::info!(primitives = stats.primitives(), "canvas rasterized");

        Ok(Composition {
            surface,
            geometry,
            extent: plan.extent(),
            stats,
            identifier: self.params.identifier(),
        })
    }
}

/// Compose a canvas in one call.
pub fn compose(
    params: &ComposeParams,
    colors: &ColorTable,
    background: Rgba8,
) -> Result<Composition> {
    Composer::new(*params)
        .with_colors(colors.clone())
        .with_background(background)
        .compose()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::seed_catalog::MAX_RADIUS;
    use crate::surface::{Primitive, PrimitiveRecorder};

    fn params(polygon_count: u32, iterations: u32) -> ComposeParams {
        ComposeParams {
            polygon_count,
            offset: -1.0 / 3.0,
            iterations,
            radius: 64,
            minimize: true,
        }
    }

    #[test]
    fn test_canvas_geometry_minimized() {
        assert_eq!(canvas_geometry(Extent::new(256), true).unwrap().side, 513);
        let g = canvas_geometry(Extent::new(300), true).unwrap();
        assert_eq!(g.side, 601);
        assert_eq!(g.margin, 300);
    }

    #[test]
    fn test_canvas_geometry_padded() {
        // 256 · 2^(1/4) = 304.44
        let g = canvas_geometry(Extent::new(256), false).unwrap();
        assert_eq!(g.margin, 304);
        assert_eq!(g.side, 609);
    }

    #[test]
    fn test_canvas_geometry_overflow() {
        assert!(matches!(
            canvas_geometry(Extent::new(1_500_000_000), false),
            Err(Error::CanvasTooLarge { .. })
        ));
        assert!(matches!(
            canvas_geometry(Extent::new(i32::MAX), true),
            Err(Error::CanvasTooLarge { side: 4_294_967_295 })
        ));
        let g = canvas_geometry(Extent::new(i32::MAX / 2), true).unwrap();
        assert_eq!(g.side, i32::MAX as u32);
    }

    #[test]
    fn test_largest_radius_plans_without_overflow() {
        let p = ComposeParams {
            polygon_count: 7,
            offset: 0.0,
            iterations: 3,
            radius: MAX_RADIUS,
            minimize: false,
        };
        let plan = Composer::new(p).plan().unwrap();
        let g = canvas_geometry(plan.extent(), false).unwrap();
        assert!(g.margin > MAX_RADIUS);

        let too_big = ComposeParams {
            radius: MAX_RADIUS + 1,
            ..p
        };
        assert!(matches!(
            Composer::new(too_big).plan(),
            Err(Error::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_unallocatable_canvas_is_an_error() {
        let p = ComposeParams {
            polygon_count: 3,
            offset: 0.5,
            iterations: 0,
            radius: MAX_RADIUS,
            minimize: true,
        };
        assert!(matches!(
            Composer::new(p).compose(),
            Err(Error::CanvasTooLarge { side: 33_554_433 })
        ));
    }

    #[test]
    fn test_default_radius() {
        let p = ComposeParams {
            radius: 0,
            ..ComposeParams::default()
        };
        assert_eq!(p.effective_radius(), DEFAULT_RADIUS);
        let explicit = ComposeParams {
            radius: DEFAULT_RADIUS,
            ..p
        };
        assert_eq!(p.identifier(), explicit.identifier());
    }

    #[test]
    fn test_unsupported_polygon_propagates() {
        let composer = Composer::new(params(4, 2));
        assert!(matches!(
            composer.plan(),
            Err(Error::UnsupportedPolygonCount(4))
        ));
        assert!(matches!(
            composer.compose(),
            Err(Error::UnsupportedPolygonCount(4))
        ));
    }

    #[test]
    fn test_invalid_offset_propagates() {
        let p = ComposeParams {
            offset: f64::NAN,
            ..params(3, 1)
        };
        assert!(matches!(Composer::new(p).plan(), Err(Error::InvalidOffset(_))));
    }

    #[test]
    fn test_plan_extent_is_global() {
        let plan = Composer::new(params(6, 3)).plan().unwrap();
        let mut max = 0;
        for curves in plan.curves() {
            for h in &curves.histories {
                for generation in h.generations() {
                    for s in generation {
                        max = max.max(s.start.magnitude()).max(s.end.magnitude());
                    }
                }
            }
        }
        assert!(plan.extent().value() >= max);
        assert!(plan.extent().value() >= 64);
    }

    #[test]
    fn test_plan_segment_totals() {
        let plan = Composer::new(params(3, 2)).plan().unwrap();
        assert_eq!(plan.curves().len(), 3);
        // per edge: 1 + 4 + 16
        assert_eq!(plan.segment_count(), 3 * 3 * 21);
    }

    #[test]
    fn test_draw_counts() {
        let plan = Composer::new(params(3, 2)).plan().unwrap();
        let mut rec = PrimitiveRecorder::new();
        let stats = draw(&plan, 0, &ColorTable::new(), Rgba8::TRANSPARENT, &mut rec);
        // per triangle: 1 seed fill, then 3 + 12 caps with their base lines
        assert_eq!(stats.fills, 3 * (1 + 3 + 12));
        assert_eq!(stats.lines, 3 * (3 + 12));
        assert_eq!(rec.fills(), stats.fills);
        assert_eq!(rec.lines(), stats.lines);
    }

    #[test]
    fn test_draw_order_and_colors() {
        let c0 = Rgba8::new(1, 0, 0, 255);
        let c1 = Rgba8::new(2, 0, 0, 255);
        let c2 = Rgba8::new(3, 0, 0, 255);
        let colors = ColorTable::new().with(0, c0).with(1, c1).with(2, c2);
        let plan = Composer::new(params(6, 2)).plan().unwrap();
        let mut rec = PrimitiveRecorder::new();
        draw(&plan, 0, &colors, Rgba8::TRANSPARENT, &mut rec);

        let per_triangle = 1 + 2 * (3 + 12);
        assert_eq!(rec.primitives.len(), 6 * per_triangle);
        for (t, chunk) in rec.primitives.chunks(per_triangle).enumerate() {
            match &chunk[0] {
                Primitive::Fill { points, color } => {
                    assert_eq!(*color, c0);
                    assert_eq!(points.as_slice(), plan.curves()[t].triangle.vertices());
                }
                other => panic!("expected seed fill, got {other:?}"),
            }
            // fill/line pairs: 3 in color 1, then 12 in color 2
            for (i, pair) in chunk[1..].chunks(2).enumerate() {
                let expected = if i < 3 { c1 } else { c2 };
                assert!(matches!(pair[0], Primitive::Fill { color, .. } if color == expected));
                assert!(matches!(pair[1], Primitive::Line { color, .. } if color == expected));
            }
        }
    }

    #[test]
    fn test_draw_iteration_one_traces_seed_edges() {
        let plan = Composer::new(params(3, 1)).plan().unwrap();
        let mut rec = PrimitiveRecorder::new();
        draw(&plan, 10, &ColorTable::new(), Rgba8::TRANSPARENT, &mut rec);
        let edges = plan.curves()[0].triangle.edges();
        let lines: Vec<(Point, Point)> = rec.primitives[..7]
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { p0, p1, .. } => Some((*p0, *p1)),
                _ => None,
            })
            .collect();
        let expected: Vec<(Point, Point)> = edges
            .iter()
            .map(|e| (e.start.offset_by(10), e.end.offset_by(10)))
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_draw_stays_inside_canvas() {
        for polygon in [3, 6, 7] {
            let plan = Composer::new(params(polygon, 3)).plan().unwrap();
            let g = canvas_geometry(plan.extent(), true).unwrap();
            let mut rec = PrimitiveRecorder::new();
            draw(&plan, g.margin, &ColorTable::new(), Rgba8::TRANSPARENT, &mut rec);
            let inside = |p: &Point| p.x >= 0 && p.y >= 0 && p.x < g.side as i32 && p.y < g.side as i32;
            for prim in &rec.primitives {
                match prim {
                    Primitive::Fill { points, .. } => assert!(points.iter().all(inside)),
                    Primitive::Line { p0, p1, .. } => assert!(inside(p0) && inside(p1)),
                }
            }
        }
    }

    #[test]
    fn test_compose_seed_only() {
        let composition = compose(
            &params(6, 0),
            &ColorTable::new().with(0, Rgba8::AZURE),
            Rgba8::TRANSPARENT,
        )
        .unwrap();
        assert_eq!(composition.extent.value(), 64);
        assert_eq!(composition.geometry.side, 129);
        assert_eq!(composition.surface.width(), 129);
        assert_eq!(composition.stats.fills, 6);
        assert_eq!(composition.stats.lines, 0);
        let center = composition.geometry.margin;
        assert_eq!(
            composition.surface.pixel(center, center - 20),
            Some(Rgba8::AZURE)
        );
        assert_eq!(composition.surface.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = Composer::new(params(7, 2)).compose().unwrap();
        let b = Composer::new(params(7, 2)).compose().unwrap();
        assert_eq!(a.geometry, b.geometry);
        assert_eq!(a.surface.as_bytes(), b.surface.as_bytes());
        assert_eq!(a.identifier, b.identifier);
    }

    #[test]
    fn test_composition_save() {
        let dir = tempfile::tempdir().unwrap();
        let composition = Composer::new(params(3, 1)).compose().unwrap();
        let path = composition.save(dir.path(), OutputFormat::Png).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("weierstrass."));
        assert!(name.ends_with(".png"));
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), composition.geometry.side);
    }
}
