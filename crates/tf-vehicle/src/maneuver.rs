//! Driver maneuvers — the actions a driver can request during its tick.

use tf_core::Vec2;

/// Why a vehicle leaves the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DespawnReason {
    /// Front sensor reported a limit-node zone: the vehicle reached the map
    /// boundary.  The normal end of life.
    LeftMap,
    /// An intersection offered no exit edge admitting the vehicle's class.
    NoExitPath,
    /// The chosen exit edge had no admissible lane-start point.
    NoLaneStart,
}

impl DespawnReason {
    /// `true` for the error reasons (everything except a normal map exit).
    pub fn is_fault(self) -> bool {
        !matches!(self, DespawnReason::LeftMap)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DespawnReason::LeftMap     => "left_map",
            DespawnReason::NoExitPath  => "no_exit_path",
            DespawnReason::NoLaneStart => "no_lane_start",
        }
    }
}

impl std::fmt::Display for DespawnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action a driver wants applied this tick.
///
/// Produced by [`DriverModel::steer`][crate::DriverModel::steer], consumed by
/// the simulation loop's apply phase.  Several maneuvers may be returned per
/// tick (a brake plus a yaw correction, say); `Despawn` trumps everything
/// else.
#[derive(Clone, PartialEq, Debug)]
pub enum Maneuver {
    /// Remove the vehicle from the simulation.
    Despawn { reason: DespawnReason },

    /// Another vehicle is ahead: hold speed at zero this tick.  There is no
    /// gradual braking — collision avoidance is a full stop.
    HardBrake,

    /// The front sensor crossed onto `edge`: update the location and
    /// reorient toward `target`, a guide point just inside the matching
    /// lane.  Re-arms the intersection-approach flag.
    EnterEdge { edge: String, target: Vec2 },

    /// Exit decision at an intersection: leave via `edge`, reorienting
    /// toward `target`, the nearest admissible lane start.  Clears the
    /// approach flag.
    TurnOnto { edge: String, target: Vec2 },

    /// Lane-keeping correction: rotate the heading by `radians`
    /// (counter-clockwise positive).
    YawBy { radians: f32 },
}
