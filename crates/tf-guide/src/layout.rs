//! Per-direction lane geometry derived from an edge and a road profile.
//!
//! Both the guide-generation pass and the sensing scene need the same
//! answers — "where does lane *i* of this direction run?" — so the offset
//! math lives here once.
//!
//! # Conventions
//!
//! Traffic keeps right.  For a travel direction `dir`, lanes lie on the
//! right-hand side of the edge spine, ordered centre → kerb.  On a two-way
//! edge the first lane sits half a separator off the spine; on a one-way
//! edge the lane group is centred on the spine.

use tf_core::Vec2;
use tf_map::{Edge, LaneKind, MapResult, RoadMap, RoadProfile};

/// The geometry of one travel direction of an edge.
#[derive(Clone, Debug)]
pub struct DirectionGeometry {
    /// Node the direction leaves.
    pub from: String,
    /// Node the direction arrives at.
    pub to: String,
    /// Spine point where drivable lanes begin (clearance applied).
    pub start: Vec2,
    /// Spine point where drivable lanes end (clearance applied).
    pub end: Vec2,
    /// Unit travel direction.
    pub dir: Vec2,
    /// Unit lateral direction toward the kerb (right of `dir`).
    pub right: Vec2,
    /// Lane kinds, centre → kerb.
    pub lanes: Vec<LaneKind>,
    /// `true` when the opposite direction also carries lanes.
    pub two_way: bool,
}

impl DirectionGeometry {
    /// Lateral offset of lane `index`'s centre from the spine, in metres.
    pub fn lane_offset(&self, profile: &RoadProfile, index: usize) -> f32 {
        let inner = index as f32 * profile.lane_width + profile.lane_width * 0.5;
        if self.two_way {
            profile.separator_width * 0.5 + inner
        } else {
            // One-way: centre the whole lane group on the spine.
            inner - self.lanes.len() as f32 * profile.lane_width * 0.5
        }
    }

    /// Start and end points of lane `index`'s centreline.
    pub fn lane_line(&self, profile: &RoadProfile, index: usize) -> (Vec2, Vec2) {
        self.offset_line(self.lane_offset(profile, index))
    }

    /// The spine shifted `offset` metres toward the kerb.
    pub fn offset_line(&self, offset: f32) -> (Vec2, Vec2) {
        let shift = self.right * offset;
        (self.start + shift, self.end + shift)
    }

    /// Drivable length of this direction.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Compute the geometry of the direction of `edge` leaving `from`.
///
/// Returns `Ok(None)` when that direction carries no lanes or the edge is
/// shorter than its endpoint clearances (degenerate stub — nothing to
/// generate).
pub fn direction_geometry(
    map: &RoadMap,
    edge: &Edge,
    from: &str,
    profile: &RoadProfile,
) -> MapResult<Option<DirectionGeometry>> {
    let Some(lanes) = edge.lanes_from(from) else {
        return Ok(None);
    };
    if lanes.is_empty() {
        return Ok(None);
    }
    let to = edge
        .other_endpoint(from)
        .expect("lanes_from succeeded, so `from` is an endpoint");

    let from_node = map.node(from)?;
    let to_node = map.node(to)?;

    let span = to_node.position - from_node.position;
    let Some(dir) = span.normalized() else {
        return Ok(None); // coincident endpoints
    };

    let clear_from = profile.clearance_for(from_node.kind);
    let clear_to   = profile.clearance_for(to_node.kind);
    if span.length() <= clear_from + clear_to {
        return Ok(None);
    }

    let two_way = edge
        .lanes_toward(from)
        .is_some_and(|opposite| !opposite.is_empty());

    Ok(Some(DirectionGeometry {
        from: from.to_owned(),
        to: to.to_owned(),
        start: from_node.position + dir * clear_from,
        end: to_node.position - dir * clear_to,
        dir,
        // Right-hand lateral: rotate the travel direction -90°.
        right: -dir.perp(),
        lanes: lanes.to_vec(),
        two_way,
    }))
}
