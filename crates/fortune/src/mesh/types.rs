//! Records of the half-edge mesh (DCEL) and their typed indices.
//!
//! Kept small and explicit so `build` and `query` stay easy to read.

use crate::geom::Point;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// An input point and the face it generates (set on first appearance).
#[derive(Clone, Copy, Debug)]
pub struct Site {
    pub point: Point,
    pub face: Option<FaceId>,
}

/// A Voronoi vertex (circumcenter of the triple whose circle event created it).
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub point: Point,
    /// Representative half-edge leaving this vertex.
    pub edge: HalfEdgeId,
}

/// Directed boundary piece. The face lies to its left.
///
/// `origin` is the start vertex; the end vertex is the twin's origin. Either
/// may stay `None` forever, which makes the half-edge part of an unbounded ray.
#[derive(Clone, Copy, Debug)]
pub struct HalfEdge {
    pub twin: HalfEdgeId,
    pub next: Option<HalfEdgeId>,
    pub prev: Option<HalfEdgeId>,
    pub origin: Option<VertexId>,
    pub face: FaceId,
}

/// One face per site; `edge` is any half-edge on its boundary.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub site: SiteId,
    pub edge: Option<HalfEdgeId>,
}

/// Boundary of one face, in `next` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceBoundary {
    pub edges: Vec<HalfEdgeId>,
    /// True when the walk came back to its start (bounded cell).
    pub closed: bool,
}
