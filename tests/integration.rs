use pool_geometry::PoolEngine;
use pool_geometry::geom::{MeshDiagnostics, compute_tangents};
use pool_geometry::pool::{
    CopingOptions, PoolConfig, PoolShape, ShapeKind, WallOptions, WaterlineOptions, build_coping, build_pool_scene,
    build_wall, build_waterline_band, compute_arc_lengths, generate_perimeter,
};

#[test]
fn engine_builds_from_json_config() {
    let mut engine = PoolEngine::new();
    let config = PoolConfig::from_json_str(r#"{"shape":"jellybean","length":10,"width":5,"depth":2}"#)
        .expect("valid config");
    engine.configure(config).expect("config accepted");

    let scene = engine.build_scene().expect("scene builds");
    assert_eq!(scene.config.shape, ShapeKind::Jellybean);
    assert_eq!(scene.meshes().len(), 6);
    assert!(scene.warnings.is_empty(), "{:?}", scene.warnings);
}

#[test]
fn manual_pipeline_matches_scene_builder() {
    let config = PoolConfig::default().with_shape(ShapeKind::Oval);
    let scene = build_pool_scene(&config).expect("scene builds");

    let perimeter = generate_perimeter(&config.pool_shape(), config.segments).expect("perimeter");
    let band = build_waterline_band(
        &perimeter,
        &WaterlineOptions::new(config.tile_size.width_meters(), config.waterline_height()),
    );
    let mut wall = build_wall(&band.metadata, &WallOptions::new(config.wall_height()));
    compute_tangents(&mut wall).expect("wall tangents");

    assert_eq!(band.metadata, scene.waterline_metadata);
    assert_eq!(wall, scene.wall);
}

#[test]
fn waterline_tile_count_covers_the_perimeter() {
    for kind in ShapeKind::ALL {
        let perimeter = generate_perimeter(&PoolShape::new(kind, 12.0, 6.0), 128).expect("perimeter");
        let table = compute_arc_lengths(&perimeter);
        let band = build_waterline_band(&perimeter, &WaterlineOptions::new(0.0508, 0.0254));

        let covered = band.metadata.tiles_around as f64 * 0.0508;
        assert!(covered >= table.total_length, "{kind}");
        assert!(covered - table.total_length < 0.0508, "{kind}");
    }
}

#[test]
fn coping_and_wall_share_the_band_perimeter() {
    let perimeter = generate_perimeter(&PoolShape::new(ShapeKind::Circular, 8.0, 8.0), 64).expect("perimeter");
    let band = build_waterline_band(&perimeter, &WaterlineOptions::new(0.1524, 0.1524));
    let coping = build_coping(&band.metadata, &CopingOptions::new(0.1524));
    let wall = build_wall(&band.metadata, &WallOptions::new(1.5));

    assert_eq!(coping.triangle_count(), 64 * 12);
    assert_eq!(wall.vertex_count(), (64 + 1) * 2);

    let diag = MeshDiagnostics::from_mesh(&coping);
    assert_eq!(diag.degenerate_triangle_count, 0);
    // Faces do not share vertices, so every quad border is an open edge.
    assert_eq!(diag.open_edge_count, 64 * 6 * 4);
    assert!(diag.is_manifold());
}

#[test]
fn every_shape_and_tile_size_builds_clean_meshes() {
    for kind in ShapeKind::ALL {
        for tile in pool_geometry::pool::TILE_SIZE_PRESETS {
            let mut config = PoolConfig::default().with_shape(kind);
            config.tile_size = tile;
            let scene = build_pool_scene(&config).expect("scene builds");

            for (name, diag) in scene.diagnostics() {
                if matches!(name, "waterline" | "wall" | "coping") {
                    assert_eq!(diag.degenerate_triangle_count, 0, "{kind}/{tile}/{name}");
                }
                assert!(diag.is_manifold(), "{kind}/{tile}/{name}: {}", diag.summary());
            }
        }
    }
}
