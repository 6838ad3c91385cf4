//! `tf-map` — road-network graph, lane codes, and map-document loading.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`lane`]     | `LaneKind`, directional lane-string parsing                |
//! | [`map`]      | `Node`, `Edge`, `RoadMap` and its query surface            |
//! | [`profile`]  | `RoadProfile` — lane widths, clearances, waypoint spacing  |
//! | [`document`] | `MapDocument` loader contract + CSV readers                |
//! | [`error`]    | `MapError`, `MapResult<T>`                                 |
//!
//! # Ownership
//!
//! [`RoadMap`] is the exclusive owner of all nodes and edges.  Mutation goes
//! through `add_node` / `add_edge` / `set_intersection_kind` only; after map
//! build the graph is read-only for the rest of the simulation.

pub mod document;
pub mod error;
pub mod lane;
pub mod map;
pub mod profile;

#[cfg(test)]
mod tests;

pub use document::{ApplyReport, EdgeRecord, MapDocument, NodeRecord};
pub use error::{MapError, MapResult};
pub use lane::LaneKind;
pub use map::{Edge, IntersectionKind, Node, NodeKind, RoadMap};
pub use profile::RoadProfile;
