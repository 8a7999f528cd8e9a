//! Curated surface for the CLI and benchmarks.
//!
//! Prefer these re-exports over reaching into submodules.

// Construction
pub use crate::sweep::{compute, compute_with, Diagram, SweepStats};
// Geometry kit
pub use crate::geom::{
    below_parabola, circumcenter, cross, distance, distance_sq, lex_cmp, parabola_equation,
    parabola_intersection, sweep_cmp, GeomCfg, Point,
};
// Mesh
pub use crate::mesh::{
    Face, FaceBoundary, FaceId, HalfEdge, HalfEdgeId, Mesh, Site, SiteId, Vertex, VertexId,
};
// Inputs
pub use crate::rand::{draw_sites, Bounds2, ReplayToken, SiteCfg};
pub use crate::sites::{prepare, validate};
// Errors
pub use crate::error::{MeshError, VoronoiError};
