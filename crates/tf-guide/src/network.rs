//! Guide-network generation and queries.
//!
//! # Generation pass
//!
//! One pass over the road map, in edge-insertion order (deterministic per
//! map):
//!
//! 1. Per edge, per direction, per **drivable** lane: a `LaneStart`, interior
//!    `OnLane` waypoints every `waypoint_spacing`, and a `LaneEnd`, chained
//!    via `outgoing` links.  Parking and Bus/HOV lanes occupy width but get
//!    no guide chain.
//! 2. Per `Continuation` node: each inbound `LaneEnd` connects to the
//!    same-ordinal outbound `LaneStart` of the neighbouring edge through
//!    `OnLane` waypoints sampled on a quadratic Bezier whose control point is
//!    the node position.
//! 3. Per `Intersection` node: each inbound `LaneEnd` links directly to the
//!    `LaneStart` of every admissible exit lane on the other incident edges
//!    (turn connectivity).  Roundabouts use the same rule — cycles come from
//!    the edge topology.
//!
//! After the pass the network is immutable.
//!
//! # Spatial index
//!
//! An R-tree over all `LaneStart` points backs
//! [`GuideNetwork::nearest_lane_start`] — the geometric search vehicles run
//! when they pick an exit edge, and the spawner runs when it places a new
//! vehicle.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use tf_core::geom::quadratic_bezier;
use tf_core::{TransportClass, TransportFilter, Vec2};
use tf_map::{LaneKind, MapResult, NodeKind, RoadMap, RoadProfile};

use crate::layout::direction_geometry;
use crate::node::{GuideId, GuideKind, GuideNode};
use crate::{GuideError, GuideResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the lane-start spatial index.
#[derive(Clone)]
struct StartEntry {
    point: [f32; 2],
    id: GuideId,
    edge: String,
    transport: TransportFilter,
}

impl RTreeObject for StartEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StartEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── LaneGuide ─────────────────────────────────────────────────────────────────

/// The guide chain of one drivable lane (one direction of one edge).
#[derive(Clone, Debug)]
pub struct LaneGuide {
    /// Owning edge id.
    pub edge: String,
    /// Node the lane leaves.
    pub from: String,
    /// Node the lane arrives at.
    pub to: String,
    /// Ordinal among the direction's drivable lanes, centre → kerb.
    pub lane_index: usize,
    pub transport: TransportFilter,
    /// Guide ids from `LaneStart` to `LaneEnd`, in travel order.
    pub chain: Vec<GuideId>,
}

impl LaneGuide {
    /// The lane's `LaneStart` id.
    #[inline]
    pub fn start(&self) -> GuideId {
        self.chain[0]
    }

    /// The lane's `LaneEnd` id.
    #[inline]
    pub fn end(&self) -> GuideId {
        *self.chain.last().expect("chain has at least start and end")
    }
}

// ── GuideNetwork ──────────────────────────────────────────────────────────────

/// The derived waypoint graph.  Build once with [`generate`](Self::generate);
/// query-only afterward.
pub struct GuideNetwork {
    nodes: Vec<GuideNode>,
    lanes: Vec<LaneGuide>,
    /// Edge id → indices into `lanes`.
    lanes_by_edge: FxHashMap<String, Vec<usize>>,
    /// Map-node id → `LaneStart` ids of lanes leaving that node.
    starts_by_node: FxHashMap<String, Vec<GuideId>>,
    start_idx: RTree<StartEntry>,
}

/// Guide transport filter of a drivable lane kind.
fn lane_transport(kind: LaneKind) -> TransportFilter {
    match kind {
        LaneKind::Public => TransportFilter::Public,
        // Normal lanes carry everyone; the unimplemented kinds never reach
        // here (filtered by `is_drivable`).
        _ => TransportFilter::PublicAndPrivate,
    }
}

/// `true` if some vehicle class is admitted by both filters.
fn filters_overlap(a: TransportFilter, b: TransportFilter) -> bool {
    [TransportClass::Private, TransportClass::Public]
        .into_iter()
        .any(|class| a.admits(class) && b.admits(class))
}

impl GuideNetwork {
    /// Run the generation pass over `map`.
    pub fn generate(map: &RoadMap, profile: &RoadProfile) -> MapResult<GuideNetwork> {
        let mut generator = Generator {
            map,
            profile,
            nodes: Vec::new(),
            lanes: Vec::new(),
            lanes_by_edge: FxHashMap::default(),
            starts_by_node: FxHashMap::default(),
        };
        generator.lane_chains()?;
        generator.link_nodes()?;
        Ok(generator.finish())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The guide node for `id`.  Ids are only minted by this network, so
    /// indexing is direct.
    #[inline]
    pub fn node(&self, id: GuideId) -> &GuideNode {
        &self.nodes[id.index()]
    }

    /// Iterator over all guide nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (GuideId, &GuideNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (GuideId(i as u32), n))
    }

    /// All lane guide chains.
    pub fn lanes(&self) -> &[LaneGuide] {
        &self.lanes
    }

    /// Lane guides belonging to `edge`, both directions.
    pub fn edge_lanes<'a>(&'a self, edge: &str) -> impl Iterator<Item = &'a LaneGuide> {
        self.lanes_by_edge
            .get(edge)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&i| &self.lanes[i])
    }

    /// `LaneStart` ids of lanes leaving map node `node` (the
    /// `getLaneStartPoints` surface).  Empty for nodes with no outbound
    /// lanes.
    pub fn lane_starts(&self, node: &str) -> &[GuideId] {
        self.starts_by_node
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `LaneStart` of `edge` nearest to `point` that admits `class`.
    ///
    /// This is the reorientation target a vehicle computes after choosing an
    /// exit edge.  Fails with [`GuideError::NoLaneStart`] when the edge has
    /// no admissible lane start — callers must despawn the vehicle rather
    /// than invent a heading.
    pub fn nearest_lane_start(
        &self,
        edge: &str,
        class: TransportClass,
        point: Vec2,
    ) -> GuideResult<GuideId> {
        self.start_idx
            .nearest_neighbor_iter(&[point.x, point.y])
            .find(|e| e.edge == edge && e.transport.admits(class))
            .map(|e| e.id)
            .ok_or_else(|| GuideError::NoLaneStart {
                edge: edge.to_owned(),
                class,
            })
    }
}

// ── Generation internals ──────────────────────────────────────────────────────

struct Generator<'a> {
    map: &'a RoadMap,
    profile: &'a RoadProfile,
    nodes: Vec<GuideNode>,
    lanes: Vec<LaneGuide>,
    lanes_by_edge: FxHashMap<String, Vec<usize>>,
    starts_by_node: FxHashMap<String, Vec<GuideId>>,
}

impl Generator<'_> {
    fn push_node(&mut self, kind: GuideKind, transport: TransportFilter, pos: Vec2) -> GuideId {
        let id = GuideId(self.nodes.len() as u32);
        self.nodes.push(GuideNode::new(kind, transport, pos));
        id
    }

    fn link(&mut self, from: GuideId, to: GuideId) {
        self.nodes[from.index()].push_outgoing(to);
    }

    /// Pass 1: per-lane chains.
    fn lane_chains(&mut self) -> MapResult<()> {
        for edge_id in self.map.edge_ids() {
            let edge = self.map.edge(edge_id)?;
            for from in [edge.source.clone(), edge.destination.clone()] {
                let Some(geo) = direction_geometry(self.map, edge, &from, self.profile)?
                else {
                    continue;
                };
                let len = geo.length();

                let mut ordinal = 0;
                for (offset_index, &kind) in geo.lanes.iter().enumerate() {
                    if !kind.is_drivable() {
                        continue;
                    }
                    let transport = lane_transport(kind);
                    let (lane_start, lane_end) = geo.lane_line(self.profile, offset_index);

                    let mut chain = Vec::new();
                    chain.push(self.push_node(GuideKind::LaneStart, transport, lane_start));

                    // Interior waypoints, one per spacing, stopping short of
                    // the lane end so OnLane and LaneEnd never coincide.
                    let mut dist = self.profile.waypoint_spacing;
                    while dist < len - self.profile.waypoint_spacing * 0.5 {
                        let pos = lane_start.lerp(lane_end, dist / len);
                        chain.push(self.push_node(GuideKind::OnLane, transport, pos));
                        dist += self.profile.waypoint_spacing;
                    }

                    chain.push(self.push_node(GuideKind::LaneEnd, transport, lane_end));
                    for pair in chain.windows(2) {
                        self.link(pair[0], pair[1]);
                    }

                    let lane_no = self.lanes.len();
                    self.starts_by_node
                        .entry(from.clone())
                        .or_default()
                        .push(chain[0]);
                    self.lanes_by_edge
                        .entry(edge_id.clone())
                        .or_default()
                        .push(lane_no);
                    self.lanes.push(LaneGuide {
                        edge: edge_id.clone(),
                        from: from.clone(),
                        to: geo.to.clone(),
                        lane_index: ordinal,
                        transport,
                        chain,
                    });
                    ordinal += 1;
                }
            }
        }
        Ok(())
    }

    /// Pass 2: connect lanes across nodes.
    fn link_nodes(&mut self) -> MapResult<()> {
        for node_id in self.map.node_ids() {
            let node = self.map.node(node_id)?;
            match node.kind {
                NodeKind::Intersection => self.link_intersection(node_id),
                NodeKind::Continuation => self.link_continuation(node_id, node.position),
                NodeKind::Limit => {} // lanes terminate at the map boundary
            }
        }
        Ok(())
    }

    /// Inbound lane ends and outbound lane indices at `node_id`, excluding
    /// pairs on the same edge.
    fn inbound_outbound(&self, node_id: &str) -> (Vec<usize>, Vec<usize>) {
        let inbound = self
            .lanes
            .iter()
            .enumerate()
            .filter(|(_, l)| l.to == node_id)
            .map(|(i, _)| i)
            .collect();
        let outbound = self
            .lanes
            .iter()
            .enumerate()
            .filter(|(_, l)| l.from == node_id)
            .map(|(i, _)| i)
            .collect();
        (inbound, outbound)
    }

    fn link_intersection(&mut self, node_id: &str) {
        let (inbound, outbound) = self.inbound_outbound(node_id);
        for &li in &inbound {
            for &lo in &outbound {
                if self.lanes[li].edge == self.lanes[lo].edge {
                    continue; // no U-turns back onto the arrival edge
                }
                if !filters_overlap(self.lanes[li].transport, self.lanes[lo].transport) {
                    continue;
                }
                let (end, start) = (self.lanes[li].end(), self.lanes[lo].start());
                self.link(end, start);
            }
        }
    }

    fn link_continuation(&mut self, node_id: &str, control: Vec2) {
        let (inbound, outbound) = self.inbound_outbound(node_id);
        for &li in &inbound {
            // Same-ordinal lane of the neighbouring edge; a narrowing road
            // merges the surplus lanes into the outermost survivor.
            let target = outbound
                .iter()
                .filter(|&&lo| self.lanes[lo].edge != self.lanes[li].edge)
                .filter(|&&lo| filters_overlap(self.lanes[li].transport, self.lanes[lo].transport))
                .min_by_key(|&&lo| {
                    self.lanes[lo]
                        .lane_index
                        .abs_diff(self.lanes[li].lane_index)
                });
            let Some(&lo) = target else { continue };

            let transport = self.lanes[li].transport;
            let p0 = self.node(self.lanes[li].end()).position;
            let p1 = self.node(self.lanes[lo].start()).position;

            // Curve waypoints through the inflection point.
            let samples = self.profile.curve_samples.max(1);
            let mut prev = self.lanes[li].end();
            for k in 1..=samples {
                let t = k as f32 / (samples + 1) as f32;
                let pos = quadratic_bezier(p0, control, p1, t);
                let on = self.push_node(GuideKind::OnLane, transport, pos);
                self.link(prev, on);
                prev = on;
            }
            self.link(prev, self.lanes[lo].start());
        }
    }

    fn node(&self, id: GuideId) -> &GuideNode {
        &self.nodes[id.index()]
    }

    fn finish(self) -> GuideNetwork {
        // Bulk-load the lane-start R-tree (faster than N inserts).
        let entries: Vec<StartEntry> = self
            .lanes
            .iter()
            .map(|lane| {
                let start = lane.start();
                let pos = self.nodes[start.index()].position;
                StartEntry {
                    point: [pos.x, pos.y],
                    id: start,
                    edge: lane.edge.clone(),
                    transport: lane.transport,
                }
            })
            .collect();
        let start_idx = RTree::bulk_load(entries);

        GuideNetwork {
            nodes: self.nodes,
            lanes: self.lanes,
            lanes_by_edge: self.lanes_by_edge,
            starts_by_node: self.starts_by_node,
            start_idx,
        }
    }
}
