//! Voronoi diagrams of planar point sets via Fortune's sweep line.
//!
//! Layout
//! - `geom`: points, tolerances, circumcenter and parabola helpers.
//! - `sweep`: event schedule, beach line, and the driver (`compute`).
//! - `mesh`: half-edge mesh (DCEL) that the sweep produces and returns.
//! - `sites`, `rand`: input checks/ordering and reproducible random inputs.
//!
//! The sweep advances toward +y. Unbounded Voronoi edges stay as half-edges
//! without an endpoint; clipping them is left to callers.

pub mod api;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod rand;
pub mod sites;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{MeshError, VoronoiError};
pub use geom::{GeomCfg, Point};
pub use sweep::{compute, compute_with, Diagram, SweepStats};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{GeomCfg, Point};
    pub use crate::mesh::{FaceId, HalfEdgeId, Mesh, SiteId, VertexId};
    pub use crate::rand::{draw_sites, Bounds2, ReplayToken, SiteCfg};
    pub use crate::sweep::{compute, compute_with, Diagram, SweepStats};
    pub use crate::VoronoiError;
    pub use nalgebra::Vector2 as Vec2;
}
