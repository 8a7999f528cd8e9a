//! Half-edge mesh (DCEL) of the Voronoi diagram.
//!
//! Purpose
//! - Own every vertex, half-edge, and face produced by the sweep; the mesh is
//!   the result handed to the caller.
//! - Half-edges are created in twin pairs when a breakpoint appears and are
//!   finished (endpoint, next/prev) when a circle event closes them.
//!
//! Conventions
//! - Typed indices (`SiteId`, `VertexId`, `HalfEdgeId`, `FaceId`) into flat vectors.
//! - A half-edge stores its origin; faces lie to the left (CCW cycles, y up).
//!
//! Code cross-refs: `sweep::beach::BeachLine::{insert, erase}`

mod build;
mod query;
mod types;

pub use build::Mesh;
pub use types::{Face, FaceBoundary, FaceId, HalfEdge, HalfEdgeId, Site, SiteId, Vertex, VertexId};
