//! Guide-node types.

use tf_core::{TransportFilter, Vec2, typed_id};

typed_id! {
    /// Index of a guide node in its owning [`GuideNetwork`][crate::GuideNetwork].
    pub struct GuideId(u32);
}

/// The role of a guide node within its lane.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuideKind {
    /// First waypoint of a lane — where vehicles enter it.
    LaneStart,
    /// Intermediate waypoint along the lane or a connecting curve.
    OnLane,
    /// Last waypoint of a lane — where turn links branch off.
    LaneEnd,
}

/// One waypoint of the derived lane network.
///
/// `outgoing` is a non-owning list of successor ids: the next waypoint along
/// the lane, or — for a `LaneEnd` at an intersection — the `LaneStart` of
/// every admissible exit lane.  Cycles are possible at roundabouts.
#[derive(Clone, Debug)]
pub struct GuideNode {
    pub kind: GuideKind,
    pub transport: TransportFilter,
    pub position: Vec2,
    outgoing: Vec<GuideId>,
}

impl GuideNode {
    pub(crate) fn new(kind: GuideKind, transport: TransportFilter, position: Vec2) -> Self {
        Self { kind, transport, position, outgoing: Vec::new() }
    }

    /// Successor guide nodes.
    pub fn outgoing(&self) -> &[GuideId] {
        &self.outgoing
    }

    /// Link addition — only the generation pass calls this; the network is
    /// immutable once built.
    pub(crate) fn push_outgoing(&mut self, next: GuideId) {
        self.outgoing.push(next);
    }
}
