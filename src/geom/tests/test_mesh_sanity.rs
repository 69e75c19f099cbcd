use crate::geom::{MeshDiagnostics, SurfaceMesh};

fn unit_quad() -> SurfaceMesh {
    SurfaceMesh::with_attributes(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        vec![0, 1, 2, 0, 2, 3],
        Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        None,
    )
}

#[test]
fn surface_mesh_validate_rejects_bad_buffers() {
    let mesh = SurfaceMesh::new(vec![[0.0, 0.0, 0.0]], vec![0]);
    assert!(mesh.validate().is_err());

    let mesh = SurfaceMesh::new(vec![[0.0, 0.0, 0.0]], vec![0, 1, 0]);
    assert!(mesh.validate().is_err());

    let mesh = SurfaceMesh::new(vec![[f64::NAN, 0.0, 0.0]; 3], vec![0, 1, 2]);
    assert!(mesh.validate().is_err());

    let mut mesh = unit_quad();
    mesh.normals = Some(vec![[0.0, 0.0, 1.0]]);
    assert!(mesh.validate().is_err());

    unit_quad().validate().expect("quad is valid");
}

#[test]
fn smooth_normals_follow_winding() {
    let mut mesh = unit_quad();
    mesh.compute_smooth_normals();

    let normals = mesh.normals.as_ref().unwrap();
    assert_eq!(normals.len(), 4);
    for n in normals {
        assert!((n[2] - 1.0).abs() < 1e-12);
    }
}

#[test]
fn flat_views_match_buffer_sizes() {
    let mut mesh = unit_quad();
    mesh.compute_smooth_normals();
    mesh.tangents = Some(vec![[1.0, 0.0, 0.0, 1.0]; 4]);

    assert_eq!(mesh.positions_flat().len(), 12);
    assert_eq!(mesh.uvs_flat().unwrap().len(), 8);
    assert_eq!(mesh.normals_flat().unwrap().len(), 12);
    assert_eq!(mesh.tangents_flat().unwrap().len(), 16);
    assert_eq!(mesh.positions_flat()[3], 1.0);
}

#[test]
fn append_offsets_indices_and_keeps_shared_attributes() {
    let mut merged = SurfaceMesh::default();
    merged.append(&unit_quad());
    merged.append(&unit_quad());

    merged.validate().expect("merged mesh is valid");
    assert_eq!(merged.vertex_count(), 8);
    assert_eq!(merged.triangle_count(), 4);
    assert_eq!(&merged.indices[6..], &[4, 5, 6, 4, 6, 7]);
    assert_eq!(merged.uvs.as_ref().map(Vec::len), Some(8));
    assert!(merged.normals.is_none());
}

#[test]
fn append_drops_attribute_missing_on_one_side() {
    let mut merged = unit_quad();
    let mut other = unit_quad();
    other.uvs = None;
    merged.append(&other);

    assert!(merged.uvs.is_none());
    merged.validate().expect("attributes dropped consistently");
}

#[test]
fn to_buffers_packs_f32() {
    let mut mesh = unit_quad();
    mesh.translate_y(-2.0);
    let buffers = mesh.to_buffers();

    assert_eq!(buffers.positions.len(), 12);
    assert_eq!(buffers.positions[1], -2.0_f32);
    assert_eq!(buffers.indices, mesh.indices);
    assert!(buffers.normals.is_none());
    assert_eq!(buffers.uvs.as_ref().map(Vec::len), Some(8));
}

#[test]
fn diagnostics_of_quad_report_open_boundary() {
    let diag = MeshDiagnostics::from_mesh(&unit_quad());
    assert_eq!(diag.vertex_count, 4);
    assert_eq!(diag.triangle_count, 2);
    assert_eq!(diag.open_edge_count, 4);
    assert!(diag.is_manifold());
    assert!(!diag.has_warnings());
}

#[test]
fn diagnostics_serialize_with_camel_case_keys() {
    let value = serde_json::to_value(MeshDiagnostics::from_mesh(&unit_quad())).unwrap();
    assert_eq!(value["vertexCount"], 4);
    assert_eq!(value["triangleCount"], 2);
    assert_eq!(value["openEdgeCount"], 4);
    assert_eq!(value["nonManifoldEdgeCount"], 0);
    assert_eq!(value["degenerateTriangleCount"], 0);
    assert_eq!(value["warnings"], serde_json::json!([]));
}
