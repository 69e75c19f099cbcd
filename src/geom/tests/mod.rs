mod test_mesh_sanity;
mod test_tangents_basic;
