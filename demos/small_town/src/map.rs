//! The small-town fixture map.
//!
//! ```text
//!                     north_gate
//!                         │ nn ("NN"/"NN" avenue)
//!  west_gate ─ w1 ─ bend ─ plaza ══ e1 ("PN"/"PN") ══ market ─ e2 ─ east_gate
//!                         │ ss                          │ b1 ("P"/"P")
//!                     south_gate                      depot
//! ```
//!
//! - `plaza` is a roundabout, `market` a normal intersection.
//! - `bend` is a continuation: westbound traffic curves through it.
//! - `depot` is a bus-only entry; the four gates emit private traffic; the
//!   `e1` corridor carries both classes side by side.

use tf_map::{EdgeRecord, MapDocument, NodeRecord};

fn node(id: &str, kind: u8, intersection_kind: u8, x: f32, y: f32) -> NodeRecord {
    NodeRecord { id: id.to_owned(), node_kind: kind, intersection_kind, x, y }
}

fn edge(id: &str, source: &str, destination: &str, name: &str, src_des: &str, des_src: &str) -> EdgeRecord {
    EdgeRecord {
        id: id.to_owned(),
        source: source.to_owned(),
        destination: destination.to_owned(),
        name: name.to_owned(),
        src_des: src_des.to_owned(),
        des_src: des_src.to_owned(),
    }
}

/// Node/edge kind bytes as the map format defines them:
/// node_kind 0 = intersection, 1 = limit, 2 = continuation;
/// intersection_kind 0 = normal, 1 = roundabout.
pub fn small_town() -> MapDocument {
    MapDocument {
        nodes: vec![
            node("plaza", 0, 1, 500.0, 500.0),
            node("market", 0, 0, 700.0, 500.0),
            node("bend", 2, 0, 300.0, 560.0),
            node("north_gate", 1, 0, 500.0, 900.0),
            node("south_gate", 1, 0, 500.0, 100.0),
            node("east_gate", 1, 0, 900.0, 500.0),
            node("west_gate", 1, 0, 100.0, 500.0),
            node("depot", 1, 0, 700.0, 180.0),
        ],
        edges: vec![
            edge("nn", "plaza", "north_gate", "North Avenue", "NN", "NN"),
            edge("ss", "plaza", "south_gate", "South Street", "N", "N"),
            edge("w1", "west_gate", "bend", "West Road", "N", "N"),
            edge("w2", "bend", "plaza", "West Road", "N", "N"),
            edge("e1", "plaza", "market", "Market Street", "PN", "PN"),
            edge("e2", "market", "east_gate", "East Road", "N", "N"),
            edge("b1", "depot", "market", "Depot Lane", "P", "P"),
        ],
    }
}
