use super::{centroid, face_normal, square_loop};
use crate::geom::{MeshDiagnostics, Vec3};
use crate::pool::{
    PoolShape, REPEATING_STRIP_TILE_COUNT, ShapeKind, WallOptions, WaterlineOptions, build_wall,
    build_waterline_band, generate_perimeter,
};

const TILE: f64 = 0.1524;

#[test]
fn waterline_band_layout_and_metadata() {
    let band = build_waterline_band(&square_loop(2.0), &WaterlineOptions::new(TILE, TILE));
    let mesh = &band.mesh;

    assert_eq!(mesh.vertex_count(), 10);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(mesh.validate().is_ok());

    let metadata = &band.metadata;
    assert_eq!(metadata.total_length, 16.0);
    assert_eq!(metadata.arc_lengths, vec![0.0, 4.0, 8.0, 12.0]);
    // 16 / 0.1524 = 104.98..
    assert_eq!(metadata.tiles_around, 105);
    assert_eq!(metadata.tile_height, TILE);
    assert_eq!(metadata.perimeter.len(), 4);
}

#[test]
fn waterline_seam_column_repeats_first_point_with_full_u() {
    let options = WaterlineOptions::new(TILE, TILE);
    let band = build_waterline_band(&square_loop(2.0), &options);
    let positions = &band.mesh.positions;
    let uvs = band.mesh.uvs.as_ref().unwrap();

    assert_eq!(positions[8], positions[0]);
    assert_eq!(positions[9], positions[1]);
    assert_eq!(uvs[0], [0.0, 0.0]);
    assert_eq!(uvs[1], [0.0, 1.0]);

    let strip_width = TILE * f64::from(REPEATING_STRIP_TILE_COUNT);
    assert!((uvs[8][0] - 16.0 / strip_width).abs() < 1e-12);
    assert!(uvs.iter().all(|uv| uv[1] == 0.0 || uv[1] == 1.0));
}

#[test]
fn waterline_is_inset_and_faces_into_the_pool() {
    let band = build_waterline_band(&square_loop(2.0), &WaterlineOptions::new(TILE, TILE));
    let mesh = &band.mesh;

    // Point 0 sits on the -z edge, so the inset pushes it toward +z.
    let [x, y, z] = mesh.positions[0];
    assert_eq!((x, y), (-2.0, 0.0));
    assert!((z + 1.99).abs() < 1e-12);
    assert_eq!(mesh.positions[1][1], TILE);

    for tri in mesh.indices.chunks_exact(3) {
        let n = face_normal(&mesh.positions, tri);
        let c = centroid(&mesh.positions, tri);
        assert!(n[0] * -c[0] + n[2] * -c[2] > 0.0, "triangle {tri:?} faces outward");
        assert!(n[1].abs() < 1e-12);
    }
    for (normal, position) in mesh.normals.as_ref().unwrap().iter().zip(&mesh.positions) {
        assert!(normal[0] * -position[0] + normal[2] * -position[2] > 0.0);
        assert_eq!(normal[1], 0.0);
    }
}

#[test]
fn waterline_inset_and_strip_count_are_configurable() {
    let options = WaterlineOptions::new(TILE, TILE).with_inset(0.0).with_strip_tile_count(4);
    let band = build_waterline_band(&square_loop(2.0), &options);

    assert_eq!(band.mesh.positions[0], [-2.0, 0.0, -2.0]);
    let uvs = band.mesh.uvs.as_ref().unwrap();
    assert!((uvs[2][0] - 4.0 / (TILE * 4.0)).abs() < 1e-12);
}

#[test]
fn wall_spans_below_the_band_and_faces_inward() {
    let band = build_waterline_band(&square_loop(2.0), &WaterlineOptions::new(TILE, TILE));
    let wall = build_wall(&band.metadata, &WallOptions::new(1.0).with_texture_repeat(0.5));

    assert_eq!(wall.vertex_count(), 10);
    assert_eq!(wall.triangle_count(), 8);
    assert!(wall.validate().is_ok());
    assert!(wall.positions.iter().all(|p| p[1] == -1.0 || p[1] == 0.0));
    // The wall sits on the perimeter itself, not the inset band.
    assert_eq!(wall.positions[0], [-2.0, -1.0, -2.0]);

    let uvs = wall.uvs.as_ref().unwrap();
    assert_eq!(uvs[1], [0.0, 2.0]);
    assert_eq!(uvs[8], [32.0, 0.0]);

    for tri in wall.indices.chunks_exact(3) {
        let n = face_normal(&wall.positions, tri);
        let c = centroid(&wall.positions, tri);
        assert!(n[0] * -c[0] + n[2] * -c[2] > 0.0);
    }
    for (normal, position) in wall.normals.as_ref().unwrap().iter().zip(&wall.positions) {
        let n = Vec3::from_array(*normal);
        assert!((n.length() - 1.0).abs() < 1e-9);
        assert!(n.x * -position[0] + n.z * -position[2] > 0.0);
    }
}

#[test]
fn wall_texture_lines_up_with_band_columns() {
    let perimeter = generate_perimeter(&PoolShape::new(ShapeKind::Jellybean, 12.0, 6.0), 128).unwrap();
    let band = build_waterline_band(&perimeter, &WaterlineOptions::new(TILE, TILE));
    let wall = build_wall(&band.metadata, &WallOptions::new(1.6));
    let uvs = wall.uvs.as_ref().unwrap();

    for column in 0..=perimeter.len() {
        assert_eq!(uvs[column * 2][0], band.metadata.column_arc(column));
    }

    let diagnostics = MeshDiagnostics::from_mesh(&wall);
    assert_eq!(diagnostics.degenerate_triangle_count, 0);
    assert!(diagnostics.is_manifold());
}
