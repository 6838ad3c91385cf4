//! The map-document loader contract.
//!
//! The on-disk map format (and its XML schema) belongs to the map producer,
//! not to this crate.  What arrives here is the **decoded** form: one record
//! per node and per edge, with per-attribute defaults already meaningful:
//!
//! | Attribute           | Type      | Default        |
//! |---------------------|-----------|----------------|
//! | `node_kind`         | byte enum | 0 (Intersection) |
//! | `intersection_kind` | byte enum | 0 (Normal)     |
//! | `x`, `y`            | float     | 0.0            |
//! | `name`              | string    | `""`           |
//! | `src_des`, `des_src`| string    | `"0"`          |
//!
//! [`MapDocument::apply`] replays nodes then edges through the `RoadMap`
//! mutation surface, so document loading has exactly the same reject
//! semantics as hand-built maps.  Rejects are counted in [`ApplyReport`]
//! (and logged by the map) rather than silently swallowed.
//!
//! # CSV readers
//!
//! For tabular sources the crate ships `load_nodes_reader` /
//! `load_edges_reader` over any `Read` (pass a `std::io::Cursor` in tests).
//!
//! ```csv
//! id,node_kind,intersection_kind,x,y
//! n0,2,0,500,1000
//! n1,1,0,1000,1200
//! n3,0,0,500,500
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::map::{IntersectionKind, NodeKind, RoadMap};
use crate::{MapError, MapResult};

// ── Records ───────────────────────────────────────────────────────────────────

fn default_lane_string() -> String {
    "0".to_owned()
}

/// One decoded node record.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    /// 0 = Intersection, 1 = Limit, 2 = Continuation.
    #[serde(default)]
    pub node_kind: u8,
    /// 0 = Normal, 1 = Roundabout.  Meaningful only for intersections.
    #[serde(default)]
    pub intersection_kind: u8,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// One decoded edge record.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_lane_string")]
    pub src_des: String,
    #[serde(default = "default_lane_string")]
    pub des_src: String,
}

// ── MapDocument ───────────────────────────────────────────────────────────────

/// A fully decoded map description, ready to be applied to a [`RoadMap`].
#[derive(Clone, Debug, Default)]
pub struct MapDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// Counters from one [`MapDocument::apply`] pass.
///
/// `rejected` covers duplicate ids, dangling endpoint references, invalid
/// lane strings, and out-of-range byte enums — the conditions the map
/// accepts as no-ops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub nodes_added: usize,
    pub nodes_rejected: usize,
    pub edges_added: usize,
    pub edges_rejected: usize,
}

impl MapDocument {
    /// Replay the document into `map`: all nodes first, then all edges
    /// (edges reference nodes, so order matters).
    pub fn apply(&self, map: &mut RoadMap) -> ApplyReport {
        let mut report = ApplyReport::default();

        for rec in &self.nodes {
            let Some(kind) = NodeKind::from_byte(rec.node_kind) else {
                log::warn!(
                    "node record {:?}: unknown node_kind byte {}, ignored",
                    rec.id,
                    rec.node_kind
                );
                report.nodes_rejected += 1;
                continue;
            };
            if !map.add_node(&rec.id, kind, rec.x, rec.y) {
                report.nodes_rejected += 1;
                continue;
            }
            report.nodes_added += 1;

            if kind == NodeKind::Intersection {
                match IntersectionKind::from_byte(rec.intersection_kind) {
                    Some(ik) => {
                        map.set_intersection_kind(&rec.id, ik);
                    }
                    None => log::warn!(
                        "node record {:?}: unknown intersection_kind byte {}, kept Normal",
                        rec.id,
                        rec.intersection_kind
                    ),
                }
            }
        }

        for rec in &self.edges {
            if map.add_edge(
                &rec.id,
                &rec.source,
                &rec.destination,
                &rec.name,
                &rec.src_des,
                &rec.des_src,
            ) {
                report.edges_added += 1;
            } else {
                report.edges_rejected += 1;
            }
        }

        report
    }

    /// Convenience: apply to a fresh map and return it with the report.
    pub fn build_map(&self) -> (RoadMap, ApplyReport) {
        let mut map = RoadMap::new();
        let report = self.apply(&mut map);
        (map, report)
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

/// Load node records from a CSV file.
pub fn load_nodes_csv(path: &Path) -> MapResult<Vec<NodeRecord>> {
    let file = std::fs::File::open(path).map_err(MapError::Io)?;
    load_nodes_reader(file)
}

/// Like [`load_nodes_csv`] but accepts any `Read` source.
pub fn load_nodes_reader<R: Read>(reader: R) -> MapResult<Vec<NodeRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<NodeRecord>()
        .map(|r| r.map_err(|e| MapError::Parse(e.to_string())))
        .collect()
}

/// Load edge records from a CSV file.
pub fn load_edges_csv(path: &Path) -> MapResult<Vec<EdgeRecord>> {
    let file = std::fs::File::open(path).map_err(MapError::Io)?;
    load_edges_reader(file)
}

/// Like [`load_edges_csv`] but accepts any `Read` source.
pub fn load_edges_reader<R: Read>(reader: R) -> MapResult<Vec<EdgeRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<EdgeRecord>()
        .map(|r| r.map_err(|e| MapError::Parse(e.to_string())))
        .collect()
}
