use super::{centroid, face_normal, square_loop};
use crate::geom::SurfaceMesh;
use crate::pool::{
    DeckError, DeckOptions, FloorError, FloorOptions, PoolShape, ShapeKind, build_deck_ring, build_deck_skirt,
    build_floor, floor_outline, generate_perimeter,
};

/// Area of the upward-facing triangles lying entirely at height `y`.
fn upward_area_at(mesh: &SurfaceMesh, y: f64) -> f64 {
    mesh.indices
        .chunks_exact(3)
        .filter(|tri| tri.iter().all(|&i| mesh.positions[i as usize][1] == y))
        .map(|tri| face_normal(&mesh.positions, tri)[1])
        .filter(|&ny| ny > 0.0)
        .map(|ny| ny / 2.0)
        .sum()
}

fn y_range(mesh: &SurfaceMesh) -> (f64, f64) {
    mesh.positions
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])))
}

#[test]
fn rectangle_floor_is_a_four_corner_slab() {
    let floor = build_floor(&PoolShape::new(ShapeKind::Rectangle, 10.0, 5.0), &FloorOptions::default()).unwrap();

    // Two caps of 4 and a side strip of 5 columns.
    assert_eq!(floor.vertex_count(), 18);
    assert_eq!(floor.triangle_count(), 12);
    assert!(floor.validate().is_ok());
    assert_eq!(y_range(&floor), (-0.3, 0.0));
    assert!((upward_area_at(&floor, 0.0) - 50.0).abs() < 1e-9);
}

#[test]
fn floor_top_cap_uses_planar_uvs() {
    let options = FloorOptions {
        texture_repeat: 2.0,
        ..FloorOptions::default()
    };
    let floor = build_floor(&PoolShape::new(ShapeKind::Rectangle, 10.0, 5.0), &options).unwrap();
    let uvs = floor.uvs.as_ref().unwrap();
    for (position, uv) in floor.positions.iter().zip(uvs).take(4) {
        assert_eq!(*uv, [position[0] / 2.0, position[2] / 2.0]);
    }
}

#[test]
fn curved_floor_outline_follows_the_perimeter() {
    let outline = floor_outline(&PoolShape::new(ShapeKind::Circular, 10.0, 6.0), 64).unwrap();
    assert_eq!(outline.len(), 64);
    for p in &outline {
        assert!((p.x.hypot(p.z) - 3.0).abs() < 1e-9);
    }

    let floor = build_floor(&PoolShape::new(ShapeKind::Jellybean, 12.0, 6.0), &FloorOptions::default()).unwrap();
    assert!(floor.validate().is_ok());
    assert!(floor.triangle_count() > 0);
}

#[test]
fn floor_rejects_bad_dimensions() {
    let result = build_floor(&PoolShape::new(ShapeKind::Rectangle, -1.0, 5.0), &FloorOptions::default());
    assert!(matches!(result, Err(FloorError::Perimeter(_))));

    let thin = FloorOptions {
        thickness: 0.0,
        ..FloorOptions::default()
    };
    let result = build_floor(&PoolShape::new(ShapeKind::Oval, 10.0, 5.0), &thin);
    assert!(matches!(result, Err(FloorError::Extrusion(_))));
}

#[test]
fn deck_ring_surrounds_the_pool() {
    let options = DeckOptions {
        width: 1.0,
        thickness: 0.05,
        ..DeckOptions::default()
    }
    .at_height(0.5);
    let deck = build_deck_ring(&square_loop(2.0), &options).unwrap();

    assert!(deck.validate().is_ok());
    let (lo, hi) = y_range(&deck);
    assert!((lo - 0.45).abs() < 1e-12);
    assert_eq!(hi, 0.5);
    // 6 x 6 outer square minus the 4 x 4 pool.
    assert!((upward_area_at(&deck, 0.5) - 20.0).abs() < 1e-9);
}

#[test]
fn deck_inner_offset_widens_the_opening() {
    let options = DeckOptions {
        width: 1.0,
        inner_offset: 0.5,
        ..DeckOptions::default()
    };
    let deck = build_deck_ring(&square_loop(2.0), &options).unwrap();
    assert!((upward_area_at(&deck, 0.0) - 11.0).abs() < 1e-9);
}

#[test]
fn deck_skirt_hangs_below_the_inner_edge_facing_out() {
    let options = DeckOptions {
        skirt_depth: 0.3,
        ..DeckOptions::default()
    }
    .at_height(0.5);
    let skirt = build_deck_skirt(&square_loop(2.0), &options).unwrap();

    assert_eq!(skirt.vertex_count(), 10);
    assert_eq!(skirt.triangle_count(), 8);
    assert!(skirt.validate().is_ok());
    assert!(skirt.positions.iter().all(|p| (p[1] - 0.2).abs() < 1e-12 || p[1] == 0.5));

    for tri in skirt.indices.chunks_exact(3) {
        let n = face_normal(&skirt.positions, tri);
        let c = centroid(&skirt.positions, tri);
        assert!(n[0] * c[0] + n[2] * c[2] > 0.0, "skirt triangle {tri:?} faces the pool");
    }
    assert!(skirt.normals.is_some());
}

#[test]
fn deck_ring_around_a_short_jellybean_is_a_closed_slab() {
    let perimeter = generate_perimeter(&PoolShape::new(ShapeKind::Jellybean, 6.0, 6.0), 128).unwrap();
    let deck = build_deck_ring(&perimeter, &DeckOptions::default()).unwrap();

    assert!(deck.validate().is_ok());
    // A 2.5 m band around a pool this size covers well over one band-width square.
    let area = upward_area_at(&deck, 0.0);
    assert!(area > 2.5 * 2.5, "deck area {area}");
}

#[test]
fn deck_narrower_than_its_inner_offset_is_rejected() {
    let options = DeckOptions {
        width: 0.5,
        inner_offset: 0.5,
        ..DeckOptions::default()
    };
    let result = build_deck_ring(&square_loop(2.0), &options);
    assert!(matches!(result, Err(DeckError::InvalidWidth { .. })));
}
