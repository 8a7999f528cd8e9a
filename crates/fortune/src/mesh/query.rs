//! Read-only traversal and consistency checks of a finished mesh.

use crate::error::MeshError;

use super::build::Mesh;
use super::types::{FaceBoundary, FaceId, HalfEdgeId, VertexId};

impl Mesh {
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges (twin pairs).
    pub fn num_edges(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Start vertex of `e`.
    #[inline]
    pub fn origin(&self, e: HalfEdgeId) -> Option<VertexId> {
        self.half_edges[e.0].origin
    }

    /// End vertex of `e` (the twin's origin).
    #[inline]
    pub fn target(&self, e: HalfEdgeId) -> Option<VertexId> {
        self.half_edges[self.half_edges[e.0].twin.0].origin
    }

    /// Both endpoints resolved.
    pub fn is_finished(&self, e: HalfEdgeId) -> bool {
        self.origin(e).is_some() && self.target(e).is_some()
    }

    pub fn finished_half_edges(&self) -> usize {
        (0..self.half_edges.len())
            .filter(|&i| self.is_finished(HalfEdgeId(i)))
            .count()
    }

    /// Half-edges missing at least one endpoint (pieces of unbounded rays or lines).
    pub fn open_half_edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.half_edges.len())
            .map(HalfEdgeId)
            .filter(move |&e| !self.is_finished(e))
    }

    /// Walk the boundary of `face` in `next` order.
    ///
    /// For an unbounded cell the chain is broken; the walk first rewinds along
    /// `prev` to the chain start so the result covers the whole chain.
    pub fn face_boundary(&self, face: FaceId) -> FaceBoundary {
        let Some(start) = self.faces[face.0].edge else {
            return FaceBoundary {
                edges: Vec::new(),
                closed: false,
            };
        };
        let limit = self.half_edges.len();
        let mut first = start;
        let mut steps = 0;
        while let Some(p) = self.half_edges[first.0].prev {
            if p == start || steps > limit {
                break;
            }
            first = p;
            steps += 1;
        }
        let mut edges = vec![first];
        let mut cur = first;
        let mut closed = false;
        while let Some(n) = self.half_edges[cur.0].next {
            if n == first {
                closed = true;
                break;
            }
            if edges.len() > limit {
                break;
            }
            edges.push(n);
            cur = n;
        }
        FaceBoundary { edges, closed }
    }

    /// Half-edges leaving `v`, rotating via `prev(e).twin` as far as the links allow.
    pub fn outgoing(&self, v: VertexId) -> Vec<HalfEdgeId> {
        let start = self.vertices[v.0].edge;
        let mut out = vec![start];
        let mut cur = start;
        loop {
            let Some(p) = self.half_edges[cur.0].prev else {
                break;
            };
            let nxt = self.half_edges[p.0].twin;
            if nxt == start || out.len() > self.half_edges.len() {
                return out;
            }
            out.push(nxt);
            cur = nxt;
        }
        // open fan: rotate the other way from the start
        let mut cur = start;
        loop {
            let twin = self.half_edges[cur.0].twin;
            let Some(n) = self.half_edges[twin.0].next else {
                break;
            };
            if out.contains(&n) {
                break;
            }
            out.push(n);
            cur = n;
        }
        out
    }

    /// Check twin involution, mutual next/prev, face and vertex agreement of
    /// linked half-edges, and vertex representatives.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (i, h) in self.half_edges.iter().enumerate() {
            let e = HalfEdgeId(i);
            if self.half_edges[h.twin.0].twin != e || h.twin == e {
                return Err(MeshError::TwinMismatch { edge: e });
            }
            if let Some(n) = h.next {
                if self.half_edges[n.0].prev != Some(e) {
                    return Err(MeshError::LinkMismatch { edge: e });
                }
                if self.half_edges[n.0].face != h.face {
                    return Err(MeshError::FaceMismatch { edge: e });
                }
                if self.target(e).is_none() || self.target(e) != self.origin(n) {
                    return Err(MeshError::VertexMismatch { edge: e });
                }
            }
            if let Some(p) = h.prev {
                if self.half_edges[p.0].next != Some(e) {
                    return Err(MeshError::LinkMismatch { edge: e });
                }
            }
        }
        for (i, v) in self.vertices.iter().enumerate() {
            if self.origin(v.edge) != Some(VertexId(i)) {
                return Err(MeshError::VertexMismatch { edge: v.edge });
            }
        }
        Ok(())
    }
}
