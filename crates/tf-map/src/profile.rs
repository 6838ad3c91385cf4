//! Road geometry constants shared by guide generation and scene building.

use crate::map::NodeKind;

/// Physical road parameters, in metres.
///
/// One profile applies to the whole map — the source format carries no
/// per-edge widths.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadProfile {
    /// Width of a single lane.
    pub lane_width: f32,

    /// Width of the painted separator between opposing directions.
    pub separator_width: f32,

    /// How far drivable lanes stop short of an intersection node's centre,
    /// leaving room for the junction box.
    pub intersection_clearance: f32,

    /// Spacing of `OnLane` guide waypoints along straight lane runs.
    pub waypoint_spacing: f32,

    /// Number of `OnLane` samples on each continuation curve.
    pub curve_samples: u32,
}

impl Default for RoadProfile {
    fn default() -> Self {
        Self {
            lane_width:              3.5,
            separator_width:         0.5,
            intersection_clearance:  8.0,
            waypoint_spacing:        10.0,
            curve_samples:           8,
        }
    }
}

impl RoadProfile {
    /// Paved width for `lanes` lanes with `separators` direction separators.
    #[inline]
    pub fn edge_width(&self, lanes: usize, separators: usize) -> f32 {
        lanes as f32 * self.lane_width + separators as f32 * self.separator_width
    }

    /// Longitudinal setback of drivable lanes from a node of `kind`.
    #[inline]
    pub fn clearance_for(&self, kind: NodeKind) -> f32 {
        match kind {
            NodeKind::Intersection => self.intersection_clearance,
            NodeKind::Limit | NodeKind::Continuation => 0.0,
        }
    }
}
