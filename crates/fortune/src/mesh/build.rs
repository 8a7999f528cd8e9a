//! Mesh construction: lazy faces, twin pairs, and closing pairs at a vertex.

use crate::error::MeshError;
use crate::geom::Point;

use super::types::{Face, FaceId, HalfEdge, HalfEdgeId, Site, SiteId, Vertex, VertexId};

/// Half-edge mesh of a Voronoi diagram under construction.
///
/// The site table lives here as well so faces and sites can refer to each
/// other by index.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub sites: Vec<Site>,
    pub vertices: Vec<Vertex>,
    pub half_edges: Vec<HalfEdge>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Mesh with one site per point and nothing else.
    pub fn new(points: &[Point]) -> Self {
        Self {
            sites: points
                .iter()
                .map(|&point| Site { point, face: None })
                .collect(),
            vertices: Vec::new(),
            half_edges: Vec::with_capacity(points.len().saturating_mul(6)),
            faces: Vec::with_capacity(points.len()),
        }
    }

    #[inline]
    pub fn site_point(&self, site: SiteId) -> Point {
        self.sites[site.0].point
    }

    /// Face of `site`, opened on first request.
    pub fn face_of(&mut self, site: SiteId) -> FaceId {
        if let Some(face) = self.sites[site.0].face {
            return face;
        }
        let face = FaceId(self.faces.len());
        self.faces.push(Face { site, edge: None });
        self.sites[site.0].face = Some(face);
        face
    }

    /// Two mutual twins with no endpoints and no links.
    ///
    /// The first bounds `face_a`, the second `face_b`.
    pub fn open_edge_pair(&mut self, face_a: FaceId, face_b: FaceId) -> (HalfEdgeId, HalfEdgeId) {
        let a = HalfEdgeId(self.half_edges.len());
        let b = HalfEdgeId(a.0 + 1);
        self.half_edges.push(HalfEdge {
            twin: b,
            next: None,
            prev: None,
            origin: None,
            face: face_a,
        });
        self.half_edges.push(HalfEdge {
            twin: a,
            next: None,
            prev: None,
            origin: None,
            face: face_b,
        });
        for (edge, face) in [(a, face_a), (b, face_b)] {
            let f = &mut self.faces[face.0];
            if f.edge.is_none() {
                f.edge = Some(edge);
            }
        }
        (a, b)
    }

    /// Close the boundaries traced by two adjacent breakpoints at `point`.
    ///
    /// `left` is (either half of) the pair traced by the breakpoint left of
    /// the vanishing arc, `right` the one right of it. The halves bounding
    /// the vanishing arc's face meet at the new vertex: the right one arrives,
    /// the left one leaves (CCW around that face). Returns a half of the
    /// continuation pair separating the two outer faces.
    pub fn close_edge_pair(
        &mut self,
        left: HalfEdgeId,
        right: HalfEdgeId,
        point: Point,
    ) -> Result<HalfEdgeId, MeshError> {
        let (arriving, leaving) = self.match_face(right, left)?;
        if self.half_edges[arriving.0].next.is_some() {
            return Err(MeshError::AlreadyLinked { edge: arriving });
        }
        if self.half_edges[leaving.0].prev.is_some() {
            return Err(MeshError::AlreadyLinked { edge: leaving });
        }
        let arriving_twin = self.half_edges[arriving.0].twin;
        let leaving_twin = self.half_edges[leaving.0].twin;
        if self.half_edges[arriving_twin.0].prev.is_some() {
            return Err(MeshError::AlreadyLinked {
                edge: arriving_twin,
            });
        }
        if self.half_edges[leaving_twin.0].next.is_some() {
            return Err(MeshError::AlreadyLinked { edge: leaving_twin });
        }
        if self.half_edges[leaving.0].origin.is_some() {
            return Err(MeshError::AlreadyTerminated { edge: leaving });
        }
        if self.half_edges[arriving_twin.0].origin.is_some() {
            return Err(MeshError::AlreadyTerminated {
                edge: arriving_twin,
            });
        }
        self.link(arriving, leaving);

        let vertex = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            point,
            edge: leaving,
        });
        self.half_edges[leaving.0].origin = Some(vertex);
        self.half_edges[arriving_twin.0].origin = Some(vertex);

        // The continuation runs between the faces on the far sides of the
        // two closed edges: `inward` ends at the vertex, `outward` leaves it.
        let inward_face = self.half_edges[arriving_twin.0].face;
        let outward_face = self.half_edges[leaving_twin.0].face;
        let (inward, outward) = self.open_edge_pair(inward_face, outward_face);
        self.link(inward, arriving_twin);
        self.link(leaving_twin, outward);
        self.half_edges[outward.0].origin = Some(vertex);
        Ok(inward)
    }

    /// Among `{a, a.twin} × {b, b.twin}` find the pair bounding one face.
    fn match_face(
        &self,
        a: HalfEdgeId,
        b: HalfEdgeId,
    ) -> Result<(HalfEdgeId, HalfEdgeId), MeshError> {
        let a_twin = self.half_edges[a.0].twin;
        let b_twin = self.half_edges[b.0].twin;
        for x in [a, a_twin] {
            for y in [b, b_twin] {
                if self.half_edges[x.0].face == self.half_edges[y.0].face {
                    return Ok((x, y));
                }
            }
        }
        Err(MeshError::NoSharedFace { left: b, right: a })
    }

    #[inline]
    fn link(&mut self, from: HalfEdgeId, to: HalfEdgeId) {
        self.half_edges[from.0].next = Some(to);
        self.half_edges[to.0].prev = Some(from);
    }
}
