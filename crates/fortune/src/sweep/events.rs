//! Event schedule: a min-priority queue of site and circle events with lazy
//! invalidation.
//!
//! Events are stored in an arena owned by the queue; the heap only holds
//! ordering keys and `EventId`s. Arcs keep an `EventId` as a non-owning
//! handle and may clear the `valid` flag; invalid events stay in the heap and
//! the driver discards them when popped.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::geom::Point;
use crate::mesh::SiteId;

use super::beach::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The sweep reaches a site.
    Site(SiteId),
    /// The arc `arc` shrinks to a point at `center` when the sweep reaches `key`.
    Circle { arc: NodeId, center: Point, key: f64 },
}

#[derive(Clone, Copy, Debug)]
struct Record {
    event: Event,
    valid: bool,
}

/// Heap entry. Order: `y`, then `x`, then sites before circles, then
/// insertion sequence (which is the `EventId`).
#[derive(Clone, Copy, Debug)]
struct Slot {
    y: f64,
    x: f64,
    kind: u8,
    id: EventId,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Slot {}
impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.id.cmp(&other.id))
    }
}

const SITE: u8 = 0;
const CIRCLE: u8 = 1;

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    records: Vec<Record>,
    heap: BinaryHeap<Reverse<Slot>>,
}

impl EventQueue {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
            heap: BinaryHeap::with_capacity(n),
        }
    }

    pub fn push_site(&mut self, site: SiteId, point: Point) -> EventId {
        self.push(Event::Site(site), point.y, point.x, SITE)
    }

    pub fn push_circle(&mut self, arc: NodeId, center: Point, key: f64) -> EventId {
        self.push(Event::Circle { arc, center, key }, key, center.x, CIRCLE)
    }

    fn push(&mut self, event: Event, y: f64, x: f64, kind: u8) -> EventId {
        let id = EventId(self.records.len());
        self.records.push(Record { event, valid: true });
        self.heap.push(Reverse(Slot { y, x, kind, id }));
        id
    }

    /// Remove and return the smallest pending event, valid or not.
    pub fn pop_min(&mut self) -> Option<(EventId, Event)> {
        let Reverse(slot) = self.heap.pop()?;
        Some((slot.id, self.records[slot.id.0].event))
    }

    /// Mark an event stale; it stays queued until popped.
    pub fn invalidate(&mut self, id: EventId) {
        self.records[id.0].valid = false;
    }

    pub fn is_valid(&self, id: EventId) -> bool {
        self.records[id.0].valid
    }

    pub fn get(&self, id: EventId) -> Event {
        self.records[id.0].event
    }

    /// Pending heap entries (including stale ones).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Events ever pushed.
    pub fn total_pushed(&self) -> usize {
        self.records.len()
    }
}
