//! Road-network representation: nodes, edges, and the `RoadMap` owner.
//!
//! # Data layout
//!
//! Nodes and edges are keyed by their document-supplied `String` ids in
//! `FxHashMap`s.  A parallel `node_order` list preserves insertion order so
//! [`RoadMap::node_ids`] round-trips the loaded document deterministically.
//! `edges_by_node` is a derived adjacency map (node id → incident edge ids,
//! insertion order) maintained by `add_edge`.
//!
//! # Insert vs. query semantics
//!
//! Inserts with duplicate ids or dangling endpoint references are **silent
//! no-ops** — this matches the behavior map producers rely on, where a
//! malformed record must never poison the rest of the document.  Each reject
//! is logged (`debug!` for duplicates, `warn!` for dangling references) so
//! the condition is observable.  Queries for unknown ids, by contrast, fail
//! loudly with a typed [`MapError`].

use rustc_hash::FxHashMap;

use tf_core::{TransportClass, TransportFilter, Vec2};

use crate::lane::{LaneKind, parse_lane_string};
use crate::profile::RoadProfile;
use crate::{MapError, MapResult};

// ── Node ──────────────────────────────────────────────────────────────────────

/// The structural role of a map node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Junction where vehicles choose among outgoing edges.
    Intersection,
    /// Map-boundary node where vehicles enter and leave the simulation.
    Limit,
    /// Non-branching point maintaining road continuity (curve inflection).
    Continuation,
}

impl NodeKind {
    /// Decode the document byte enum (see [`crate::document`]).
    pub fn from_byte(b: u8) -> Option<NodeKind> {
        match b {
            0 => Some(NodeKind::Intersection),
            1 => Some(NodeKind::Limit),
            2 => Some(NodeKind::Continuation),
            _ => None,
        }
    }
}

/// Intersection flavor — meaningful only when `NodeKind::Intersection`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionKind {
    #[default]
    Normal,
    Roundabout,
}

impl IntersectionKind {
    /// Decode the document byte enum.
    pub fn from_byte(b: u8) -> Option<IntersectionKind> {
        match b {
            0 => Some(IntersectionKind::Normal),
            1 => Some(IntersectionKind::Roundabout),
            _ => None,
        }
    }
}

/// A node of the road graph.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Vec2,
    /// Only meaningful when `kind == NodeKind::Intersection`.
    pub intersection_kind: IntersectionKind,
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A road segment between two nodes, carrying up to two directed lane groups.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub name: String,
    /// Lanes carrying traffic source → destination.  Empty = none.
    src_des: Vec<LaneKind>,
    /// Lanes carrying traffic destination → source.  Empty = none.
    des_src: Vec<LaneKind>,
}

impl Edge {
    /// Total lane count across both directions.
    #[inline]
    pub fn lane_count(&self) -> usize {
        self.src_des.len() + self.des_src.len()
    }

    /// Lanes carrying traffic *away from* `node`, or `None` if `node` is not
    /// an endpoint of this edge.
    pub fn lanes_from(&self, node: &str) -> Option<&[LaneKind]> {
        if node == self.source {
            Some(&self.src_des)
        } else if node == self.destination {
            Some(&self.des_src)
        } else {
            None
        }
    }

    /// Lanes carrying traffic *toward* `node`.
    pub fn lanes_toward(&self, node: &str) -> Option<&[LaneKind]> {
        if node == self.source {
            Some(&self.des_src)
        } else if node == self.destination {
            Some(&self.src_des)
        } else {
            None
        }
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other_endpoint(&self, node: &str) -> Option<&str> {
        if node == self.source {
            Some(&self.destination)
        } else if node == self.destination {
            Some(&self.source)
        } else {
            None
        }
    }

    /// `true` if the direction leaving `node` has at least one lane a
    /// vehicle of `class` may drive.
    pub fn admits_from(&self, node: &str, class: TransportClass) -> bool {
        self.lanes_from(node)
            .is_some_and(|lanes| lanes.iter().any(|l| l.admits(class)))
    }

    /// Paved width of the edge under `profile`.
    pub fn width(&self, profile: &RoadProfile) -> f32 {
        let separators = if !self.src_des.is_empty() && !self.des_src.is_empty() {
            1
        } else {
            0
        };
        profile.edge_width(self.lane_count(), separators)
    }
}

// ── RoadMap ───────────────────────────────────────────────────────────────────

/// The road graph.  Exclusive owner of all nodes and edges; read-only after
/// map build.
#[derive(Default)]
pub struct RoadMap {
    nodes: FxHashMap<String, Node>,
    edges: FxHashMap<String, Edge>,
    /// Node ids in insertion order — the order `node_ids()` reports.
    node_order: Vec<String>,
    /// Edge ids in insertion order — derived passes iterate this so guide
    /// generation is deterministic per map.
    edge_order: Vec<String>,
    /// Node id → incident edge ids, in edge-insertion order.
    edges_by_node: FxHashMap<String, Vec<String>>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation (map build only) ─────────────────────────────────────────

    /// Insert a node.  Returns `false` (and leaves the map untouched) if the
    /// id is already present.
    pub fn add_node(&mut self, id: &str, kind: NodeKind, x: f32, y: f32) -> bool {
        if self.nodes.contains_key(id) {
            log::debug!("add_node: duplicate id {id:?} ignored");
            return false;
        }
        self.nodes.insert(
            id.to_owned(),
            Node {
                id: id.to_owned(),
                kind,
                position: Vec2::new(x, y),
                intersection_kind: IntersectionKind::Normal,
            },
        );
        self.node_order.push(id.to_owned());
        true
    }

    /// Insert an edge.  Returns `false` if the id collides, either endpoint
    /// is absent, or a lane string fails to parse.
    pub fn add_edge(
        &mut self,
        id: &str,
        source: &str,
        destination: &str,
        name: &str,
        src_des: &str,
        des_src: &str,
    ) -> bool {
        if self.edges.contains_key(id) {
            log::debug!("add_edge: duplicate id {id:?} ignored");
            return false;
        }
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(destination) {
            log::warn!(
                "add_edge: {id:?} references missing endpoint ({source:?} → {destination:?}), ignored"
            );
            return false;
        }
        let (Some(fwd), Some(rev)) = (parse_lane_string(src_des), parse_lane_string(des_src))
        else {
            log::warn!("add_edge: {id:?} has invalid lane string ({src_des:?} / {des_src:?}), ignored");
            return false;
        };

        self.edges.insert(
            id.to_owned(),
            Edge {
                id: id.to_owned(),
                source: source.to_owned(),
                destination: destination.to_owned(),
                name: name.to_owned(),
                src_des: fwd,
                des_src: rev,
            },
        );
        self.edge_order.push(id.to_owned());
        for endpoint in [source, destination] {
            self.edges_by_node
                .entry(endpoint.to_owned())
                .or_default()
                .push(id.to_owned());
        }
        true
    }

    /// Reclassify an intersection.  Returns `false` if the id is absent or
    /// the node is not an intersection.
    pub fn set_intersection_kind(&mut self, id: &str, kind: IntersectionKind) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.kind == NodeKind::Intersection => {
                node.intersection_kind = kind;
                true
            }
            Some(_) => {
                log::debug!("set_intersection_kind: {id:?} is not an intersection, ignored");
                false
            }
            None => {
                log::debug!("set_intersection_kind: unknown node {id:?} ignored");
                false
            }
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn node(&self, id: &str) -> MapResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| MapError::UnknownNode(id.to_owned()))
    }

    pub fn edge(&self, id: &str) -> MapResult<&Edge> {
        self.edges
            .get(id)
            .ok_or_else(|| MapError::UnknownEdge(id.to_owned()))
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> &[String] {
        &self.node_order
    }

    /// All edge ids in insertion order.
    pub fn edge_ids(&self) -> &[String] {
        &self.edge_order
    }

    pub fn node_position(&self, id: &str) -> MapResult<Vec2> {
        self.node(id).map(|n| n.position)
    }

    /// Iterator over all edges (arbitrary order).
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Edge ids incident to `node`, in edge-insertion order.
    pub fn incident_edges(&self, node: &str) -> MapResult<&[String]> {
        if !self.nodes.contains_key(node) {
            return Err(MapError::UnknownNode(node.to_owned()));
        }
        Ok(self
            .edges_by_node
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Total lane count of an edge across both directions (`"0"` sides
    /// contribute zero).
    pub fn lanes(&self, edge_id: &str) -> MapResult<usize> {
        self.edge(edge_id).map(Edge::lane_count)
    }

    /// Drivable length of an edge: endpoint distance minus each endpoint's
    /// clearance under `profile`.
    pub fn edge_length(&self, edge_id: &str, profile: &RoadProfile) -> MapResult<f32> {
        let edge = self.edge(edge_id)?;
        let src = self.node(&edge.source)?;
        let des = self.node(&edge.destination)?;
        let full = src.position.distance(des.position);
        let cleared =
            full - profile.clearance_for(src.kind) - profile.clearance_for(des.kind);
        Ok(cleared.max(0.0))
    }

    // ── Entry nodes ───────────────────────────────────────────────────────

    /// Whether `id` is a traffic entry point, and if so which classes it
    /// emits (the `isEntryNode` query).
    ///
    /// A node qualifies when it is a `Limit` node whose single edge carries
    /// at least one drivable lane *leaving* the node.  The filter follows
    /// the outbound lane mix: public-only lanes → `Public`, normal-only →
    /// `Private`, both → `PublicAndPrivate`.
    pub fn entry_filter(&self, id: &str) -> MapResult<Option<TransportFilter>> {
        let node = self.node(id)?;
        if node.kind != NodeKind::Limit {
            return Ok(None);
        }
        let Some(edge_id) = self.edges_by_node.get(id).and_then(|e| e.first()) else {
            return Ok(None);
        };
        let edge = self.edge(edge_id)?;
        let lanes = edge.lanes_from(id).unwrap_or(&[]);

        let has_public = lanes.iter().any(|l| *l == LaneKind::Public);
        let has_normal = lanes.iter().any(|l| *l == LaneKind::Normal);
        Ok(match (has_public, has_normal) {
            (true, true)   => Some(TransportFilter::PublicAndPrivate),
            (true, false)  => Some(TransportFilter::Public),
            (false, true)  => Some(TransportFilter::Private),
            (false, false) => None,
        })
    }

    /// Unit vector pointing from a Limit node into the map, along its single
    /// incident edge.
    pub fn entry_orientation(&self, id: &str) -> MapResult<Vec2> {
        let node = self.node(id)?;
        let edge_id = (node.kind == NodeKind::Limit)
            .then(|| self.edges_by_node.get(id).and_then(|e| e.first()))
            .flatten()
            .ok_or_else(|| MapError::NotALimitNode(id.to_owned()))?;
        let edge = self.edge(edge_id)?;
        let other = edge
            .other_endpoint(id)
            .ok_or_else(|| MapError::UnknownEdge(edge_id.clone()))?;
        let toward = self.node(other)?.position - node.position;
        toward
            .normalized()
            .ok_or_else(|| MapError::NotALimitNode(id.to_owned()))
    }

    // ── Exit selection ────────────────────────────────────────────────────

    /// Edge ids a vehicle of `class` can take to leave `intersection`,
    /// excluding the edge it arrived on.
    ///
    /// An edge qualifies when its direction leaving the intersection has at
    /// least one lane admitting `class`.  Order follows edge insertion, so
    /// results are deterministic per map.
    pub fn exit_paths(
        &self,
        intersection: &str,
        arrival_edge: &str,
        class: TransportClass,
    ) -> MapResult<Vec<&str>> {
        let incident = self.incident_edges(intersection)?;
        Ok(incident
            .iter()
            .filter(|id| id.as_str() != arrival_edge)
            .filter_map(|id| self.edges.get(id))
            .filter(|edge| edge.admits_from(intersection, class))
            .map(|edge| edge.id.as_str())
            .collect())
    }
}
