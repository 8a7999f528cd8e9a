//! Beach line: a binary tree whose leaves are arcs (left to right in sweep
//! order) and whose internal nodes are breakpoints between adjacent arcs.
//!
//! Nodes live in an arena addressed by `NodeId`; erased slots are recycled
//! through a free list. Child links are the ownership edges of the tree;
//! `parent` is a plain back-reference used to find neighbouring breakpoints.
//!
//! Invariants:
//! - In-order leaves are the arcs in left-to-right order at the current sweep.
//! - A breakpoint's `left_arc`/`right_arc` are the rightmost leaf of its left
//!   subtree and the leftmost leaf of its right subtree.
//! - A breakpoint's `edge` is one half of the twin pair it traces; the pair is
//!   opened when the breakpoint appears and never replaced while it lives.

use crate::error::VoronoiError;
use crate::geom::{parabola_intersection, GeomCfg, Point};
use crate::mesh::{HalfEdgeId, Mesh, SiteId};

use super::events::{EventId, EventQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Leaf: the visible part of one site's parabola.
#[derive(Clone, Copy, Debug)]
pub struct Arc {
    pub site: SiteId,
    /// Pending circle event predicting this arc's disappearance (not owned).
    pub circle: Option<EventId>,
}

/// Internal node: the intersection of two adjacent arcs.
#[derive(Clone, Copy, Debug)]
pub struct Breakpoint {
    pub left: NodeId,
    pub right: NodeId,
    pub left_arc: NodeId,
    pub right_arc: NodeId,
    pub edge: HalfEdgeId,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Arc(Arc),
    Breakpoint(Breakpoint),
    Free,
}

#[derive(Clone, Copy, Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: Kind,
}

const MISSING_ARC: VoronoiError = VoronoiError::Invariant("expected an arc node");
const MISSING_BREAKPOINT: VoronoiError = VoronoiError::Invariant("expected a breakpoint node");

#[derive(Clone, Debug)]
pub struct BeachLine {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    arcs: usize,
    cfg: GeomCfg,
}

impl BeachLine {
    pub fn new(cfg: GeomCfg) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            arcs: 0,
            cfg,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of arcs currently on the beach line.
    pub fn len_arcs(&self) -> usize {
        self.arcs
    }

    pub fn arc(&self, id: NodeId) -> Option<Arc> {
        match self.nodes.get(id.0)?.kind {
            Kind::Arc(a) => Some(a),
            _ => None,
        }
    }

    pub fn breakpoint(&self, id: NodeId) -> Option<Breakpoint> {
        match self.nodes.get(id.0)?.kind {
            Kind::Breakpoint(b) => Some(b),
            _ => None,
        }
    }

    pub fn site(&self, arc: NodeId) -> Option<SiteId> {
        self.arc(arc).map(|a| a.site)
    }

    pub fn circle(&self, arc: NodeId) -> Option<EventId> {
        self.arc(arc).and_then(|a| a.circle)
    }

    pub fn set_circle(&mut self, arc: NodeId, event: Option<EventId>) {
        if let Some(Kind::Arc(a)) = self.nodes.get_mut(arc.0).map(|n| &mut n.kind) {
            a.circle = event;
        }
    }

    fn take_circle(&mut self, arc: NodeId) -> Option<EventId> {
        match self.nodes.get_mut(arc.0).map(|n| &mut n.kind) {
            Some(Kind::Arc(a)) => a.circle.take(),
            _ => None,
        }
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    fn breakpoint_mut(&mut self, id: NodeId) -> Result<&mut Breakpoint, VoronoiError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(Kind::Breakpoint(b)) => Ok(b),
            _ => Err(MISSING_BREAKPOINT),
        }
    }

    fn alloc(&mut self, parent: Option<NodeId>, kind: Kind) -> NodeId {
        let node = Node { parent, kind };
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = node;
            id
        } else {
            self.nodes.push(node);
            NodeId(self.nodes.len() - 1)
        }
    }

    fn alloc_arc(&mut self, site: SiteId) -> NodeId {
        self.alloc(None, Kind::Arc(Arc { site, circle: None }))
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = Node {
            parent: None,
            kind: Kind::Free,
        };
        self.free.push(id);
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    /// Put `new` where `old` hangs below `parent` (or at the root).
    fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), VoronoiError> {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                let bp = self.breakpoint_mut(p)?;
                if bp.left == old {
                    bp.left = new;
                } else if bp.right == old {
                    bp.right = new;
                } else {
                    return Err(VoronoiError::Invariant("child is not linked from its parent"));
                }
            }
        }
        self.set_parent(new, parent);
        Ok(())
    }

    /// x of a breakpoint for the sweep at `y`.
    pub fn breakpoint_x(&self, bp: &Breakpoint, y: f64, mesh: &Mesh) -> Option<f64> {
        let l = mesh.site_point(self.site(bp.left_arc)?);
        let r = mesh.site_point(self.site(bp.right_arc)?);
        Some(parabola_intersection(l, r, y, self.cfg))
    }

    /// Arc above `p` for the sweep at `y`. Ties at a breakpoint go left.
    pub fn locate(&self, p: Point, y: f64, mesh: &Mesh) -> Option<NodeId> {
        let mut cur = self.root?;
        loop {
            match self.nodes[cur.0].kind {
                Kind::Arc(_) => return Some(cur),
                Kind::Breakpoint(bp) => {
                    let x = self.breakpoint_x(&bp, y, mesh)?;
                    cur = if x < p.x { bp.right } else { bp.left };
                }
                Kind::Free => return None,
            }
        }
    }

    /// Nearest ancestor having `leaf` as its right arc.
    pub fn left_breakpoint(&self, leaf: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(leaf);
        while let Some(c) = cur {
            if self.breakpoint(c)?.right_arc == leaf {
                return Some(c);
            }
            cur = self.parent(c);
        }
        None
    }

    /// Nearest ancestor having `leaf` as its left arc.
    pub fn right_breakpoint(&self, leaf: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(leaf);
        while let Some(c) = cur {
            if self.breakpoint(c)?.left_arc == leaf {
                return Some(c);
            }
            cur = self.parent(c);
        }
        None
    }

    pub fn prev(&self, leaf: NodeId) -> Option<NodeId> {
        self.left_breakpoint(leaf)
            .and_then(|b| self.breakpoint(b))
            .map(|b| b.left_arc)
    }

    pub fn next(&self, leaf: NodeId) -> Option<NodeId> {
        self.right_breakpoint(leaf)
            .and_then(|b| self.breakpoint(b))
            .map(|b| b.right_arc)
    }

    pub fn leftmost(&self) -> Option<NodeId> {
        let mut cur = self.root?;
        while let Some(bp) = self.breakpoint(cur) {
            cur = bp.left;
        }
        Some(cur)
    }

    /// Arcs from left to right.
    pub fn arcs(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.leftmost();
        std::iter::from_fn(move || {
            let out = cur?;
            cur = self.next(out);
            Some(out)
        })
    }

    /// Sites of the arcs from left to right.
    pub fn leaf_sites(&self) -> Vec<SiteId> {
        self.arcs().filter_map(|a| self.site(a)).collect()
    }

    /// Breakpoints, evaluated at `y`, are non-decreasing left to right
    /// (relative slack `tol`).
    pub fn check_order(&self, y: f64, mesh: &Mesh, tol: f64) -> bool {
        let sites: Vec<Point> = self
            .leaf_sites()
            .into_iter()
            .map(|s| mesh.site_point(s))
            .collect();
        let xs: Vec<f64> = sites
            .windows(2)
            .map(|w| parabola_intersection(w[0], w[1], y, self.cfg))
            .collect();
        xs.windows(2)
            .all(|w| w[0] <= w[1] + tol * (1.0 + w[0].abs().max(w[1].abs())))
    }

    /// Site event: split the arc above `site` and return the new arc.
    ///
    /// The located arc's pending circle event is invalidated. The new site
    /// gets its face; the split site reuses its face (or opens it now).
    pub fn insert(
        &mut self,
        site: SiteId,
        y: f64,
        mesh: &mut Mesh,
        queue: &mut EventQueue,
    ) -> Result<NodeId, VoronoiError> {
        let p = mesh.site_point(site);
        if self.root.is_none() {
            let id = self.alloc_arc(site);
            self.root = Some(id);
            self.arcs = 1;
            mesh.face_of(site);
            return Ok(id);
        }
        let above = self
            .locate(p, y, mesh)
            .ok_or(VoronoiError::Invariant("point location left the tree"))?;
        let Arc {
            site: above_site,
            circle,
        } = self.arc(above).ok_or(MISSING_ARC)?;
        if let Some(ev) = circle {
            queue.invalidate(ev);
        }
        let face_new = mesh.face_of(site);
        let face_old = mesh.face_of(above_site);
        let q = mesh.site_point(above_site);
        if q.y == y {
            return self.insert_beside(above, site, p.x > q.x, mesh);
        }

        let parent = self.parent(above);
        let lpar = self.left_breakpoint(above);
        let rpar = self.right_breakpoint(above);

        let split_left = self.alloc_arc(above_site);
        let new = self.alloc_arc(site);
        let split_right = self.alloc_arc(above_site);
        let (edge_new, edge_old) = mesh.open_edge_pair(face_new, face_old);
        let right_bp = self.alloc(
            None,
            Kind::Breakpoint(Breakpoint {
                left: new,
                right: split_right,
                left_arc: new,
                right_arc: split_right,
                edge: edge_new,
            }),
        );
        let left_bp = self.alloc(
            parent,
            Kind::Breakpoint(Breakpoint {
                left: split_left,
                right: right_bp,
                left_arc: split_left,
                right_arc: new,
                edge: edge_old,
            }),
        );
        self.set_parent(split_left, Some(left_bp));
        self.set_parent(right_bp, Some(left_bp));
        self.set_parent(new, Some(right_bp));
        self.set_parent(split_right, Some(right_bp));

        if let Some(l) = lpar {
            self.breakpoint_mut(l)?.right_arc = split_left;
        }
        if let Some(r) = rpar {
            self.breakpoint_mut(r)?.left_arc = split_right;
        }
        self.replace_child(parent, above, left_bp)?;
        self.release(above);
        self.arcs += 2;

        debug_assert_eq!(self.next(split_left), Some(new));
        debug_assert_eq!(self.next(new), Some(split_right));
        debug_assert_eq!(self.prev(split_right), Some(new));
        debug_assert_eq!(self.prev(new), Some(split_left));
        Ok(new)
    }

    /// Site on the same horizontal as the arc above it (every site so far
    /// shares the lowest y): place the new arc next to it under a single
    /// breakpoint instead of splitting a degenerate parabola.
    fn insert_beside(
        &mut self,
        above: NodeId,
        site: SiteId,
        to_the_right: bool,
        mesh: &mut Mesh,
    ) -> Result<NodeId, VoronoiError> {
        let parent = self.parent(above);
        let lpar = self.left_breakpoint(above);
        let rpar = self.right_breakpoint(above);
        let new = self.alloc_arc(site);
        let (left, right) = if to_the_right {
            (above, new)
        } else {
            (new, above)
        };
        let face_left = mesh.face_of(self.site(left).ok_or(MISSING_ARC)?);
        let face_right = mesh.face_of(self.site(right).ok_or(MISSING_ARC)?);
        let (edge, _) = mesh.open_edge_pair(face_left, face_right);
        let bp = self.alloc(
            parent,
            Kind::Breakpoint(Breakpoint {
                left,
                right,
                left_arc: left,
                right_arc: right,
                edge,
            }),
        );
        self.replace_child(parent, above, bp)?;
        self.set_parent(left, Some(bp));
        self.set_parent(right, Some(bp));
        if to_the_right {
            if let Some(r) = rpar {
                self.breakpoint_mut(r)?.left_arc = new;
            }
        } else if let Some(l) = lpar {
            self.breakpoint_mut(l)?.right_arc = new;
        }
        self.arcs += 1;
        Ok(new)
    }

    /// Circle event: remove `arc`, closing its two bounding edges at `vertex`.
    ///
    /// Pending circle events of both neighbours are invalidated (their triples
    /// change). Returns the former left neighbour.
    pub fn erase(
        &mut self,
        arc: NodeId,
        vertex: Point,
        mesh: &mut Mesh,
        queue: &mut EventQueue,
    ) -> Result<NodeId, VoronoiError> {
        let lft = self
            .left_breakpoint(arc)
            .ok_or(VoronoiError::Invariant("vanishing arc has no left breakpoint"))?;
        let rht = self
            .right_breakpoint(arc)
            .ok_or(VoronoiError::Invariant("vanishing arc has no right breakpoint"))?;
        let lb = self.breakpoint(lft).ok_or(MISSING_BREAKPOINT)?;
        let rb = self.breakpoint(rht).ok_or(MISSING_BREAKPOINT)?;
        let prev = lb.left_arc;
        let next = rb.right_arc;
        for neighbour in [prev, next] {
            if let Some(ev) = self.take_circle(neighbour) {
                queue.invalidate(ev);
            }
        }
        self.take_circle(arc);

        let edge = mesh.close_edge_pair(lb.edge, rb.edge, vertex)?;

        let parent = self
            .parent(arc)
            .ok_or(VoronoiError::Invariant("vanishing arc has no parent"))?;
        if parent == lft {
            //        rht
            //      ...
            //   lft
            //  /   \
            // T     arc
            let grand = self.parent(lft);
            self.replace_child(grand, lft, lb.left)?;
            let r = self.breakpoint_mut(rht)?;
            r.left_arc = prev;
            r.edge = edge;
            self.release(lft);
        } else if parent == rht {
            // lft
            //    ...
            //        rht
            //       /   \
            //     arc    T
            let grand = self.parent(rht);
            self.replace_child(grand, rht, rb.right)?;
            let l = self.breakpoint_mut(lft)?;
            l.right_arc = next;
            l.edge = edge;
            self.release(rht);
        } else {
            return Err(VoronoiError::Invariant(
                "vanishing arc hangs below neither neighbouring breakpoint",
            ));
        }
        self.release(arc);
        self.arcs -= 1;
        Ok(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn setup(points: &[Point]) -> (BeachLine, Mesh, EventQueue) {
        (
            BeachLine::new(GeomCfg::default()),
            Mesh::new(points),
            EventQueue::default(),
        )
    }

    #[test]
    fn first_site_becomes_root_arc() {
        let (mut b, mut m, mut q) = setup(&[vector![1.0, 1.0]]);
        let a = b.insert(SiteId(0), 1.0, &mut m, &mut q).unwrap();
        assert_eq!(b.len_arcs(), 1);
        assert_eq!(b.leftmost(), Some(a));
        assert!(b.prev(a).is_none() && b.next(a).is_none());
        assert_eq!(m.num_faces(), 1);
        assert_eq!(m.num_half_edges(), 0);
    }

    #[test]
    fn split_produces_three_adjacent_arcs() {
        let pts = [vector![0.0, 0.0], vector![1.0, 2.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        b.insert(SiteId(0), 0.0, &mut m, &mut q).unwrap();
        let new = b.insert(SiteId(1), 2.0, &mut m, &mut q).unwrap();
        let l = b.prev(new).unwrap();
        let r = b.next(new).unwrap();
        assert_eq!(b.next(l), Some(new));
        assert_eq!(b.prev(r), Some(new));
        assert_eq!(b.leaf_sites(), vec![SiteId(0), SiteId(1), SiteId(0)]);
        assert_eq!(m.num_faces(), 2);
        assert_eq!(m.num_edges(), 1);
        assert!(b.check_order(2.5, &m, 1e-9));
    }

    #[test]
    fn locate_follows_breakpoints() {
        let pts = [vector![0.0, 0.0], vector![10.0, 1.0], vector![-8.0, 3.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        b.insert(SiteId(0), 0.0, &mut m, &mut q).unwrap();
        b.insert(SiteId(1), 1.0, &mut m, &mut q).unwrap();
        let above = b.locate(pts[2], 3.0, &m).unwrap();
        assert_eq!(b.site(above), Some(SiteId(0)));
        assert_eq!(b.next(above).and_then(|n| b.site(n)), Some(SiteId(1)));
        let new = b.insert(SiteId(2), 3.0, &mut m, &mut q).unwrap();
        assert_eq!(b.prev(new).and_then(|n| b.site(n)), Some(SiteId(0)));
        assert_eq!(
            b.leaf_sites(),
            vec![SiteId(0), SiteId(2), SiteId(0), SiteId(1), SiteId(0)]
        );
        assert!(b.check_order(3.5, &m, 1e-9));
    }

    #[test]
    fn insertion_invalidates_the_split_arcs_event() {
        let pts = [vector![0.0, 0.0], vector![1.0, 2.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        let root = b.insert(SiteId(0), 0.0, &mut m, &mut q).unwrap();
        let ev = q.push_circle(root, vector![0.0, 5.0], 9.0);
        b.set_circle(root, Some(ev));
        b.insert(SiteId(1), 2.0, &mut m, &mut q).unwrap();
        assert!(!q.is_valid(ev));
        assert!(b.arc(root).is_none());
    }

    #[test]
    fn equal_heights_sit_side_by_side() {
        let pts = [vector![0.0, 0.0], vector![10.0, 0.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        b.insert(SiteId(0), 0.0, &mut m, &mut q).unwrap();
        let new = b.insert(SiteId(1), 0.0, &mut m, &mut q).unwrap();
        assert_eq!(b.len_arcs(), 2);
        assert_eq!(b.leaf_sites(), vec![SiteId(0), SiteId(1)]);
        assert!(b.next(new).is_none());
        assert_eq!(m.num_edges(), 1);
    }

    #[test]
    fn erase_merges_breakpoints_and_returns_left_neighbour() {
        // b | a | b | c | b after three site events; erase the middle b.
        let pts = [vector![5.0, -5.0], vector![0.0, 0.0], vector![10.0, 0.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        b.insert(SiteId(0), -5.0, &mut m, &mut q).unwrap();
        let a = b.insert(SiteId(1), 0.0, &mut m, &mut q).unwrap();
        let c = b.insert(SiteId(2), 0.0, &mut m, &mut q).unwrap();
        let mid = b.prev(c).unwrap();
        assert_eq!(b.prev(mid), Some(a));
        let left = b.erase(mid, vector![5.0, 0.0], &mut m, &mut q).unwrap();
        assert_eq!(left, a);
        assert_eq!(b.next(a), Some(c));
        assert_eq!(b.len_arcs(), 4);
        assert_eq!(
            b.leaf_sites(),
            vec![SiteId(0), SiteId(1), SiteId(2), SiteId(0)]
        );
        assert_eq!(m.num_vertices(), 1);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn erase_requires_both_neighbours() {
        let pts = [vector![0.0, 0.0], vector![1.0, 2.0]];
        let (mut b, mut m, mut q) = setup(&pts);
        b.insert(SiteId(0), 0.0, &mut m, &mut q).unwrap();
        let new = b.insert(SiteId(1), 2.0, &mut m, &mut q).unwrap();
        let edge_arc = b.leftmost().unwrap();
        assert!(b.erase(edge_arc, vector![0.0, 0.0], &mut m, &mut q).is_err());
        assert!(b.next(new).is_some());
    }
}
