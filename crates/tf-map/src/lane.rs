//! Lane-type codes and directional lane-string parsing.
//!
//! Each edge carries two lane strings, one per travel direction.  A lane
//! string is either the literal `"0"` (no lanes in that direction) or a
//! sequence of single-character codes, one per lane, ordered from the road
//! centre outward:
//!
//! | Code | Kind      | Traffic admitted                    |
//! |------|-----------|-------------------------------------|
//! | `N`  | Normal    | private and public                  |
//! | `P`  | Public    | public transit only                 |
//! | `R`  | Parking   | none (parsed, never driven)         |
//! | `B`  | Bus/HOV   | none (parsed, never driven)         |
//!
//! Parking and Bus/HOV lanes count toward an edge's lane total and width but
//! generate no guide lanes and admit no simulated traffic.

use tf_core::TransportClass;

/// The traffic class of a single lane.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneKind {
    Normal,
    Public,
    Parking,
    BusHov,
}

impl LaneKind {
    /// Decode a single lane-string character.
    pub fn from_code(c: char) -> Option<LaneKind> {
        match c {
            'N' => Some(LaneKind::Normal),
            'P' => Some(LaneKind::Public),
            'R' => Some(LaneKind::Parking),
            'B' => Some(LaneKind::BusHov),
            _ => None,
        }
    }

    /// The lane-string character for this kind.
    pub fn code(self) -> char {
        match self {
            LaneKind::Normal  => 'N',
            LaneKind::Public  => 'P',
            LaneKind::Parking => 'R',
            LaneKind::BusHov  => 'B',
        }
    }

    /// `true` for lane kinds simulated vehicles can occupy.
    #[inline]
    pub fn is_drivable(self) -> bool {
        matches!(self, LaneKind::Normal | LaneKind::Public)
    }

    /// `true` if a vehicle of `class` may use this lane.
    ///
    /// Normal lanes admit everyone; public lanes admit transit only;
    /// the unimplemented kinds admit nobody.
    #[inline]
    pub fn admits(self, class: TransportClass) -> bool {
        match self {
            LaneKind::Normal => true,
            LaneKind::Public => class == TransportClass::Public,
            LaneKind::Parking | LaneKind::BusHov => false,
        }
    }
}

/// Parse a directional lane string into per-lane kinds.
///
/// `"0"` decodes to an empty lane list.  Any unknown character makes the
/// whole string invalid — the caller (edge insertion) rejects the edge.
pub fn parse_lane_string(s: &str) -> Option<Vec<LaneKind>> {
    if s == "0" {
        return Some(Vec::new());
    }
    s.chars().map(LaneKind::from_code).collect()
}
