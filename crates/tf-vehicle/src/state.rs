//! Per-vehicle dynamic state.

use tf_core::{Tick, Vec2};

use crate::spec::VehicleSpec;

/// Where a vehicle currently is, in map terms.
///
/// Updated only by applied maneuvers: `TurnOnto`/`EnterEdge` move the
/// vehicle onto an edge; the node variant exists for the instant of spawn.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Location {
    Node(String),
    Edge(String),
}

impl Location {
    /// The edge id, if the vehicle is on an edge.
    pub fn edge(&self) -> Option<&str> {
        match self {
            Location::Edge(id) => Some(id),
            Location::Node(_) => None,
        }
    }
}

/// The full dynamic state of one live vehicle.
#[derive(Clone, Debug)]
pub struct VehicleState {
    pub spec: VehicleSpec,
    pub position: Vec2,
    /// Unit travel direction.
    pub heading: Vec2,
    /// Current speed in m/s.  Ramps toward `spec.max_speed`; forced to 0 by
    /// a `HardBrake`.
    pub speed: f32,
    pub location: Location,
    /// `true` from spawn (and from each edge entry) until the next
    /// intersection exit decision — the "first encounter" flag of the
    /// approach state.
    pub awaiting_exit: bool,
    /// Monotonic spawn counter, unique across the whole run.  Seeds the
    /// vehicle's RNG stream and survives slot reuse.
    pub spawn_serial: u64,
    pub spawned_at: Tick,
}

impl VehicleState {
    /// Fresh state at a spawn point.
    pub fn spawn(
        spec: VehicleSpec,
        position: Vec2,
        heading: Vec2,
        edge: &str,
        spawn_serial: u64,
        spawned_at: Tick,
    ) -> Self {
        Self {
            spec,
            position,
            heading,
            speed: 0.0,
            location: Location::Edge(edge.to_owned()),
            awaiting_exit: true,
            spawn_serial,
            spawned_at,
        }
    }
}
