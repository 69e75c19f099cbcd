use crate::geom::Point3;
use crate::pool::{PerimeterError, PerimeterLoop, PoolShape, ShapeKind, generate_perimeter};

fn generate(kind: ShapeKind, length: f64, width: f64, segments: usize) -> PerimeterLoop {
    generate_perimeter(&PoolShape::new(kind, length, width), segments).unwrap()
}

#[test]
fn rectangle_has_exact_corners_and_starts_bottom_left() {
    let perimeter = generate(ShapeKind::Rectangle, 10.0, 5.0, 128);
    let points = perimeter.points();

    assert_eq!(points.len(), 128);
    assert_eq!(points[0], Point3::new(-5.0, 0.0, -2.5));
    assert_eq!(points[32], Point3::new(5.0, 0.0, -2.5));
    assert_eq!(points[64], Point3::new(5.0, 0.0, 2.5));
    assert_eq!(points[96], Point3::new(-5.0, 0.0, 2.5));
    // Traversal runs +x first.
    assert!(points[1].x > points[0].x);
    assert!(points.iter().all(|p| p.y == 0.0));
}

#[test]
fn rectangle_floors_segments_per_side() {
    assert_eq!(generate(ShapeKind::Rectangle, 4.0, 2.0, 130).len(), 128);
    assert_eq!(generate(ShapeKind::Rectangle, 4.0, 2.0, 4).len(), 4);
}

#[test]
fn oval_samples_equal_angles() {
    let perimeter = generate(ShapeKind::Oval, 10.0, 6.0, 128);
    let points = perimeter.points();

    assert_eq!(points.len(), 128);
    assert_eq!(points[0], Point3::new(5.0, 0.0, 0.0));
    assert!(points[32].x.abs() < 1e-12);
    assert!((points[32].z - 3.0).abs() < 1e-12);
}

#[test]
fn circular_uses_smaller_dimension() {
    let perimeter = generate(ShapeKind::Circular, 10.0, 6.0, 128);
    let max_radius = perimeter
        .points()
        .iter()
        .map(|p| p.x.hypot(p.z))
        .fold(0.0_f64, f64::max);
    assert!((max_radius - 3.0).abs() < 1e-9);
    for p in perimeter.points() {
        assert!((p.x.hypot(p.z) - 3.0).abs() < 1e-9);
    }
}

#[test]
fn jellybean_is_asymmetric() {
    let perimeter = generate(ShapeKind::Jellybean, 12.0, 6.0, 128);
    let bounds = perimeter.bounds().unwrap();

    // 65 points per end arc, 31 per transition.
    assert_eq!(perimeter.len(), 192);
    assert!((bounds.max.x - 5.5).abs() < 1e-9);
    assert!((bounds.min.x + 6.5).abs() < 1e-9);
    assert!((bounds.max.x - bounds.min.x.abs()).abs() > 0.5);
    assert!((bounds.min.z + 3.0).abs() < 1e-9);
}

#[test]
fn every_shape_runs_counterclockwise() {
    for kind in ShapeKind::ALL {
        let perimeter = generate(kind, 12.0, 6.0, 128);
        assert!(perimeter.is_ccw(), "{kind} perimeter is not counterclockwise");
        assert!(perimeter.len() >= 3);
    }
}

#[test]
fn generation_is_deterministic() {
    for kind in ShapeKind::ALL {
        assert_eq!(generate(kind, 9.0, 4.5, 96), generate(kind, 9.0, 4.5, 96));
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    let cases = [
        PoolShape::new(ShapeKind::Rectangle, 0.0, 5.0),
        PoolShape::new(ShapeKind::Oval, 10.0, -1.0),
        PoolShape::new(ShapeKind::Circular, f64::NAN, 5.0),
        PoolShape::new(ShapeKind::Jellybean, f64::INFINITY, 5.0),
        // Shorter than its two end radii (3 + 2).
        PoolShape::new(ShapeKind::Jellybean, 4.0, 6.0),
    ];
    for shape in cases {
        assert!(
            matches!(
                generate_perimeter(&shape, 64),
                Err(PerimeterError::InvalidShapeParameters { .. })
            ),
            "{shape:?} should be rejected"
        );
    }

    assert!(generate_perimeter(&PoolShape::new(ShapeKind::Oval, 10.0, 5.0), 3).is_err());
}

#[test]
fn perimeter_loop_rejects_coincident_points() {
    let a = Point3::on_plan(0.0, 0.0);
    let b = Point3::on_plan(1.0, 0.0);
    let c = Point3::on_plan(1.0, 1.0);

    assert!(PerimeterLoop::new(vec![a, b, b, c]).is_err());
    // Wrap edge counts too.
    assert!(PerimeterLoop::new(vec![a, b, c, a]).is_err());
    assert!(PerimeterLoop::new(vec![a, b]).is_err());
    assert!(PerimeterLoop::new(vec![a, b, Point3::on_plan(f64::NAN, 0.0)]).is_err());
    assert!(PerimeterLoop::new(vec![a, b, c]).is_ok());
}

#[test]
fn shape_kind_parses_and_serializes_lowercase() {
    assert_eq!("Oval".parse::<ShapeKind>().unwrap(), ShapeKind::Oval);
    assert_eq!(" jellybean ".parse::<ShapeKind>().unwrap(), ShapeKind::Jellybean);
    assert!("kidney".parse::<ShapeKind>().is_err());

    assert_eq!(serde_json::to_string(&ShapeKind::Circular).unwrap(), "\"circular\"");
    let kind: ShapeKind = serde_json::from_str("\"rectangle\"").unwrap();
    assert_eq!(kind, ShapeKind::Rectangle);
}

#[test]
fn pool_shape_round_trips_kind_and_dimensions() {
    let shape = PoolShape::new(ShapeKind::Jellybean, 12.0, 6.0);
    assert_eq!(shape.kind(), ShapeKind::Jellybean);
    assert_eq!(shape.dimensions(), (12.0, 6.0));
}
