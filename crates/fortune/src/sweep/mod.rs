//! Fortune sweep: event loop driving the beach line and the mesh builder.
//!
//! Purpose
//! - Pop events in increasing sweep coordinate (the sweep moves toward +y),
//!   insert arcs on site events, erase arcs on valid circle events, and
//!   schedule circle events for every freshly adjacent arc triple.
//! - Leave half-edges of unbounded Voronoi edges open; clipping is up to the caller.
//!
//! Circle scheduling for a triple `(a, b, c)` with middle arc `b` requires two
//! distinct outer sites, converging breakpoints (`a, b, c` turn CCW), an
//! existing circumcenter, and a key not behind the sweep.
//!
//! Code cross-refs: `beach::BeachLine`, `events::EventQueue`, `mesh::Mesh`

pub mod beach;
pub mod events;

use tracing::{debug, trace};

use crate::error::VoronoiError;
use crate::geom::{circumcenter, cross, distance, GeomCfg, Point};
use crate::mesh::{Mesh, SiteId};
use crate::sites;

use beach::{BeachLine, NodeId};
use events::{Event, EventId, EventQueue};

/// Counters collected during one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub site_events: usize,
    pub circles_scheduled: usize,
    pub circles_fired: usize,
    /// Popped circle events that had been invalidated.
    pub circles_discarded: usize,
    /// Largest number of arcs on the beach line at any time.
    pub peak_arcs: usize,
}

/// Result of a sweep: the mesh plus run statistics.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub mesh: Mesh,
    pub stats: SweepStats,
}

/// Voronoi diagram of `points` with default tolerances.
pub fn compute(points: &[Point]) -> Result<Diagram, VoronoiError> {
    compute_with(points, GeomCfg::default())
}

/// Voronoi diagram of `points`.
///
/// Pre: points are finite and pairwise distinct (checked; violations are
/// returned as errors before the sweep starts). Order does not matter.
pub fn compute_with(points: &[Point], cfg: GeomCfg) -> Result<Diagram, VoronoiError> {
    sites::validate(points)?;
    Sweep::new(points, cfg).run()
}

/// Driver state: schedule, beach line, mesh, nothing else besides counters.
struct Sweep {
    cfg: GeomCfg,
    queue: EventQueue,
    beach: BeachLine,
    mesh: Mesh,
    stats: SweepStats,
}

impl Sweep {
    fn new(points: &[Point], cfg: GeomCfg) -> Self {
        let mut queue = EventQueue::with_capacity(points.len() * 3);
        for (i, &p) in points.iter().enumerate() {
            queue.push_site(SiteId(i), p);
        }
        Self {
            cfg,
            queue,
            beach: BeachLine::new(cfg),
            mesh: Mesh::new(points),
            stats: SweepStats::default(),
        }
    }

    fn run(mut self) -> Result<Diagram, VoronoiError> {
        while let Some((id, event)) = self.queue.pop_min() {
            match event {
                Event::Site(site) => self.on_site(site)?,
                Event::Circle { arc, center, key } => {
                    if !self.queue.is_valid(id) {
                        self.stats.circles_discarded += 1;
                        trace!(event = id.0, key, "stale circle event");
                        continue;
                    }
                    self.on_circle(id, arc, center, key)?;
                }
            }
            self.stats.peak_arcs = self.stats.peak_arcs.max(self.beach.len_arcs());
        }
        debug!(
            sites = self.mesh.num_sites(),
            faces = self.mesh.num_faces(),
            vertices = self.mesh.num_vertices(),
            half_edges = self.mesh.num_half_edges(),
            scheduled = self.stats.circles_scheduled,
            discarded = self.stats.circles_discarded,
            "sweep finished"
        );
        Ok(Diagram {
            mesh: self.mesh,
            stats: self.stats,
        })
    }

    fn on_site(&mut self, site: SiteId) -> Result<(), VoronoiError> {
        self.stats.site_events += 1;
        let y = self.mesh.site_point(site).y;
        let arc = self
            .beach
            .insert(site, y, &mut self.mesh, &mut self.queue)?;
        trace!(site = site.0, y, arcs = self.beach.len_arcs(), "site event");
        if let Some(prev) = self.beach.prev(arc) {
            self.schedule_circle(prev, y);
        }
        if let Some(next) = self.beach.next(arc) {
            self.schedule_circle(next, y);
        }
        Ok(())
    }

    fn on_circle(
        &mut self,
        id: EventId,
        arc: NodeId,
        center: Point,
        key: f64,
    ) -> Result<(), VoronoiError> {
        if self.beach.circle(arc) != Some(id) {
            return Err(VoronoiError::Invariant(
                "valid circle event is not attached to its arc",
            ));
        }
        self.stats.circles_fired += 1;
        let left = self
            .beach
            .erase(arc, center, &mut self.mesh, &mut self.queue)?;
        trace!(event = id.0, key, x = center.x, y = center.y, "circle event");
        self.schedule_circle(left, key);
        if let Some(right) = self.beach.next(left) {
            self.schedule_circle(right, key);
        }
        Ok(())
    }

    /// Schedule the disappearance of `arc` if its current triple converges.
    fn schedule_circle(&mut self, arc: NodeId, sweep_y: f64) {
        let (Some(prev), Some(next)) = (self.beach.prev(arc), self.beach.next(arc)) else {
            return;
        };
        let (Some(sa), Some(sb), Some(sc)) = (
            self.beach.site(prev),
            self.beach.site(arc),
            self.beach.site(next),
        ) else {
            return;
        };
        if sa == sc {
            return;
        }
        let (a, b, c) = (
            self.mesh.site_point(sa),
            self.mesh.site_point(sb),
            self.mesh.site_point(sc),
        );
        if cross(a, b, c) <= 0.0 {
            return;
        }
        let Some(center) = circumcenter(a, b, c, self.cfg) else {
            return;
        };
        let key = center.y + distance(center, b);
        if key < sweep_y - self.cfg.eps_sweep {
            return;
        }
        if let Some(old) = self.beach.circle(arc) {
            self.queue.invalidate(old);
        }
        let id = self.queue.push_circle(arc, center, key);
        self.beach.set_circle(arc, Some(id));
        self.stats.circles_scheduled += 1;
    }
}
