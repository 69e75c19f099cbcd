pub mod cyclic;

mod core;
mod diagnostics;
mod extrusion;
mod mesh;
mod strip;
mod tangents;
mod triangulation;

pub use core::{BBox, PlanPoint, Point3, Transform, Vec3};
pub use diagnostics::MeshDiagnostics;
pub use extrusion::{ExtrusionError, SlabOptions, extrude_region};
pub use mesh::{MeshBuffers, SurfaceMesh};
pub use strip::{StripFacing, build_strip_indices};
pub use tangents::{TangentError, UV_DETERMINANT_EPSILON, compute_tangents};
pub use triangulation::{
    PlanRegion, PlanTriangulation, TriangulationError, signed_area, triangulate_plan_region,
};

#[cfg(test)]
mod tests;
