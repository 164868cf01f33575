//! End-to-end checks over the public API: seed lookup, subdivision, canvas
//! sizing, drawing and saving.

use fractal_geometry::canvas::DEFAULT_RADIUS;
use fractal_geometry::surface::Primitive;
use fractal_geometry::{
    canvas_geometry, compose, draw, seed_triangles, subdivide, ColorTable, ComposeParams,
    Composer, Error, Extent, FractalConfig, OutputFormat, PrimitiveRecorder, Rgba8, Segment,
};

fn triangle_edges(polygon: u32, radius: i32) -> Vec<Segment> {
    seed_triangles(polygon, radius)
        .unwrap()
        .iter()
        .flat_map(|t| t.edges())
        .collect()
}

#[test]
fn segment_count_grows_by_four() {
    let seeds = triangle_edges(6, 200);
    for iterations in 0..=4u32 {
        let (histories, _) = subdivide(&seeds, 0.5, iterations, Extent::new(200)).unwrap();
        let total: usize = histories.iter().map(|h| h.final_generation().len()).sum();
        assert_eq!(total, seeds.len() * 4usize.pow(iterations));
        for h in &histories {
            for (k, generation) in h.generations().enumerate() {
                assert_eq!(generation.len(), 4usize.pow(k as u32));
            }
        }
    }
}

#[test]
fn generations_chain_head_to_tail() {
    let seeds = triangle_edges(7, 300);
    let (histories, _) = subdivide(&seeds, -1.0 / 3.0, 3, Extent::new(300)).unwrap();
    for h in &histories {
        for generation in h.generations() {
            assert_eq!(generation.first().map(|s| s.start), Some(h.seed().start));
            assert_eq!(generation.last().map(|s| s.end), Some(h.seed().end));
            for w in generation.windows(2) {
                assert_eq!(w[0].end, w[1].start);
            }
        }
    }
}

#[test]
fn extent_is_monotone_and_bounded_below() {
    let seeds = triangle_edges(3, 128);
    let mut previous = Extent::new(128);
    for iterations in 0..=5 {
        let (_, extent) = subdivide(&seeds, 0.8, iterations, Extent::new(128)).unwrap();
        assert!(extent.value() >= 128);
        assert!(extent.value() >= previous.value());
        previous = extent;
    }
}

#[test]
fn subdivision_is_deterministic() {
    let seeds = triangle_edges(7, 512);
    let a = subdivide(&seeds, -1.0 / 3.0, 4, Extent::new(512)).unwrap();
    let b = subdivide(&seeds, -1.0 / 3.0, 4, Extent::new(512)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_offset_meets_anchors_at_the_midpoint() {
    // offset 0 puts both anchors half way along the segment.
    let seeds = triangle_edges(3, 256);
    let (histories, _) = subdivide(&seeds, 0.0, 2, Extent::new(256)).unwrap();
    for h in &histories {
        for k in 1..=2 {
            let generation = h.generation(k).unwrap();
            for quad in generation.chunks(4) {
                assert_eq!(quad[0].end, quad[3].start);
            }
        }
    }
}

#[test]
fn canvas_side_for_minimized_radius() {
    assert_eq!(canvas_geometry(Extent::new(256), true).unwrap().side, 513);
    assert_eq!(canvas_geometry(Extent::new(300), true).unwrap().side, 601);

    let params = ComposeParams {
        polygon_count: 3,
        offset: 0.5,
        iterations: 0,
        radius: 256,
        minimize: true,
    };
    let composition = Composer::new(params).compose().unwrap();
    assert_eq!(composition.geometry.side, 513);
    assert_eq!(composition.surface.width(), 513);
    assert_eq!(composition.surface.height(), 513);
}

#[test]
fn unsupported_polygon_produces_nothing() {
    let params = ComposeParams {
        polygon_count: 4,
        ..ComposeParams::default()
    };
    let result = compose(&params, &ColorTable::new(), Rgba8::TRANSPARENT);
    assert!(matches!(result, Err(Error::UnsupportedPolygonCount(4))));
}

#[test]
fn heptagon_has_24_triangles_that_scale() {
    let small = seed_triangles(7, 100).unwrap();
    let large = seed_triangles(7, 1000).unwrap();
    assert_eq!(small.len(), 24);
    assert_eq!(large.len(), 24);
    for (s, l) in small.iter().zip(large.iter()) {
        for (p, q) in s.vertices().iter().zip(l.vertices()) {
            assert!((q.x - 10 * p.x).abs() <= 40, "{p:?} vs {q:?}");
            assert!((q.y - 10 * p.y).abs() <= 40, "{p:?} vs {q:?}");
        }
    }
}

#[test]
fn layers_draw_in_triangle_then_iteration_order() {
    let colors: ColorTable = (0..=3).map(|i| (i, Rgba8::new(i as u8, 0, 0, 255))).collect();
    let plan = Composer::new(ComposeParams {
        polygon_count: 3,
        offset: 0.25,
        iterations: 3,
        radius: 90,
        minimize: true,
    })
    .plan()
    .unwrap();
    let mut rec = PrimitiveRecorder::new();
    let stats = draw(&plan, plan.extent().value(), &colors, Rgba8::TRANSPARENT, &mut rec);
    assert_eq!(stats.primitives(), rec.primitives.len());

    let per_triangle = rec.primitives.len() / 3;
    for chunk in rec.primitives.chunks(per_triangle) {
        let shades: Vec<u8> = chunk
            .iter()
            .map(|p| match p {
                Primitive::Fill { color, .. } | Primitive::Line { color, .. } => color.r,
            })
            .collect();
        assert_eq!(shades[0], 0);
        assert!(shades.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(shades.last(), Some(&3));
    }
}

#[test]
fn config_drives_a_full_render() {
    let dir = tempfile::tempdir().unwrap();
    let config = FractalConfig::from_toml_str(&format!(
        r#"
        polygon = 6
        offset = -0.5
        iterations = 3
        radius = 48
        minimize = true
        output_dir = "{}"
        format = "bmp"

        [colors]
        0 = [18, 80, 123, 255]
        1 = [234, 238, 241, 255]
        "#,
        dir.path().display().to_string().replace('\\', "/")
    ))
    .unwrap();

    let composition = Composer::new(config.compose_params())
        .with_colors(config.color_table().unwrap())
        .with_background(config.background)
        .compose()
        .unwrap();
    let path = composition.save(&config.output_dir, config.format).unwrap();

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("bmp"));
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(composition.identifier.file_name("bmp").as_str())
    );
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.width(), composition.geometry.side);
    assert_eq!(decoded.height(), composition.geometry.side);
}

#[test]
fn default_radius_applies_when_zero() {
    let params = ComposeParams {
        polygon_count: 3,
        iterations: 0,
        radius: 0,
        minimize: true,
        ..ComposeParams::default()
    };
    let composition = Composer::new(params).compose().unwrap();
    assert_eq!(composition.extent.value(), DEFAULT_RADIUS);
    assert_eq!(composition.geometry.side, 2 * DEFAULT_RADIUS as u32 + 1);
}

#[test]
fn png_output_matches_surface() {
    let dir = tempfile::tempdir().unwrap();
    let composition = Composer::new(ComposeParams {
        polygon_count: 7,
        offset: -1.0 / 3.0,
        iterations: 2,
        radius: 40,
        minimize: false,
    })
    .compose()
    .unwrap();
    let path = composition.save(dir.path(), OutputFormat::Png).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw().as_slice(), composition.surface.as_bytes());
}
