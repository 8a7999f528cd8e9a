//! JSON dump of a computed diagram.
//!
//! Ids are plain indices into the arrays of the same dump. Unbounded edges
//! show up as half-edges with `origin` or twin origin `null`.

use anyhow::{Context, Result};
use fortune::mesh::FaceId;
use fortune::{Diagram, SweepStats};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HalfEdgeDump {
    pub twin: usize,
    pub next: Option<usize>,
    pub prev: Option<usize>,
    pub origin: Option<usize>,
    pub face: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FaceDump {
    pub site: usize,
    pub edge: Option<usize>,
    /// Boundary is a closed cycle (bounded cell).
    pub closed: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsDump {
    pub site_events: usize,
    pub circles_scheduled: usize,
    pub circles_fired: usize,
    pub circles_discarded: usize,
    pub peak_arcs: usize,
}

impl From<SweepStats> for StatsDump {
    fn from(s: SweepStats) -> Self {
        Self {
            site_events: s.site_events,
            circles_scheduled: s.circles_scheduled,
            circles_fired: s.circles_fired,
            circles_discarded: s.circles_discarded,
            peak_arcs: s.peak_arcs,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiagramDump {
    pub version: String,
    pub sites: Vec<[f64; 2]>,
    pub vertices: Vec<[f64; 2]>,
    pub half_edges: Vec<HalfEdgeDump>,
    pub faces: Vec<FaceDump>,
    pub stats: StatsDump,
}

impl DiagramDump {
    pub fn from_diagram(d: &Diagram) -> Self {
        let m = &d.mesh;
        Self {
            version: fortune::VERSION.to_string(),
            sites: m.sites.iter().map(|s| [s.point.x, s.point.y]).collect(),
            vertices: m.vertices.iter().map(|v| [v.point.x, v.point.y]).collect(),
            half_edges: m
                .half_edges
                .iter()
                .map(|h| HalfEdgeDump {
                    twin: h.twin.0,
                    next: h.next.map(|e| e.0),
                    prev: h.prev.map(|e| e.0),
                    origin: h.origin.map(|v| v.0),
                    face: h.face.0,
                })
                .collect(),
            faces: (0..m.num_faces())
                .map(|i| FaceDump {
                    site: m.faces[i].site.0,
                    edge: m.faces[i].edge.map(|e| e.0),
                    closed: m.face_boundary(FaceId(i)).closed,
                })
                .collect(),
            stats: d.stats.into(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune::Point;
    use tempfile::tempdir;

    fn six() -> Diagram {
        let pts: Vec<Point> = [
            (84.0, 25.0),
            (36.0, 11.0),
            (97.0, 25.0),
            (82.0, 49.0),
            (19.0, 53.0),
            (61.0, 67.0),
        ]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect();
        fortune::compute(&pts).unwrap()
    }

    #[test]
    fn dump_mirrors_mesh() {
        let d = six();
        let dump = DiagramDump::from_diagram(&d);
        assert_eq!(dump.sites.len(), 6);
        assert_eq!(dump.faces.len(), 6);
        assert_eq!(dump.vertices.len(), d.mesh.num_vertices());
        assert_eq!(dump.half_edges.len(), d.mesh.num_half_edges());
        assert_eq!(dump.stats.circles_fired, dump.vertices.len());
        for (i, h) in dump.half_edges.iter().enumerate() {
            assert_eq!(dump.half_edges[h.twin].twin, i);
        }
        assert!(dump.faces.iter().any(|f| !f.closed));
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let dump = DiagramDump::from_diagram(&six());
        dump.write(&path).unwrap();
        let back: DiagramDump = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.sites, dump.sites);
        assert_eq!(back.half_edges, dump.half_edges);
        assert_eq!(back.faces, dump.faces);
        assert_eq!(back.stats, dump.stats);
    }
}
