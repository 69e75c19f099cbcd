use crate::geom::{SurfaceMesh, TangentError, compute_tangents};

fn quad(uvs: Vec<[f64; 2]>) -> SurfaceMesh {
    SurfaceMesh::with_attributes(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        vec![0, 1, 2, 0, 2, 3],
        Some(uvs),
        Some(vec![[0.0, 0.0, 1.0]; 4]),
    )
}

fn assert_tangent_frame(mesh: &SurfaceMesh) {
    let tangents = mesh.tangents.as_ref().expect("tangents present");
    let normals = mesh.normals.as_ref().unwrap();
    assert_eq!(tangents.len(), mesh.vertex_count());
    for (t, n) in tangents.iter().zip(normals) {
        assert!(t.iter().all(|v| v.is_finite()));
        let len = (t[0] * t[0] + t[1] * t[1] + t[2] * t[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-9);
        assert!((t[0] * n[0] + t[1] * n[1] + t[2] * n[2]).abs() < 1e-9);
        assert!(t[3] == 1.0 || t[3] == -1.0);
    }
}

#[test]
fn tangent_follows_increasing_u() {
    let mut mesh = quad(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    compute_tangents(&mut mesh).unwrap();

    assert_tangent_frame(&mesh);
    for t in mesh.tangents.as_ref().unwrap() {
        assert!((t[0] - 1.0).abs() < 1e-12);
        assert_eq!(t[3], 1.0);
    }
}

#[test]
fn mirrored_v_flips_handedness() {
    let mut mesh = quad(vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
    compute_tangents(&mut mesh).unwrap();

    assert_tangent_frame(&mesh);
    assert!(mesh.tangents.as_ref().unwrap().iter().all(|t| t[3] == -1.0));
}

#[test]
fn degenerate_uvs_fall_back_to_perpendicular_unit_vector() {
    let mut mesh = quad(vec![[0.5, 0.5]; 4]);
    compute_tangents(&mut mesh).unwrap();
    assert_tangent_frame(&mesh);
}

#[test]
fn missing_attributes_fail_and_leave_mesh_untouched() {
    let mut mesh = quad(vec![[0.0, 0.0]; 4]);
    mesh.normals = None;
    let before = mesh.clone();

    let err = compute_tangents(&mut mesh).unwrap_err();
    assert!(matches!(err, TangentError::MissingMeshAttributes { ref missing } if missing == "normals"));
    assert_eq!(mesh, before);

    let mut mesh = quad(vec![[0.0, 0.0]; 3]);
    assert!(compute_tangents(&mut mesh).is_err());
    assert!(mesh.tangents.is_none());

    let mut empty = SurfaceMesh::default();
    assert!(compute_tangents(&mut empty).is_err());
}
