//! The `DriverModel` trait and the default sensor-driven driver.

use tf_core::{TransportClass, Vec2, VehicleId, VehicleRng};
use tf_sensor::{BoundaryLine, SensedSurface};

use crate::context::DriveContext;
use crate::maneuver::{DespawnReason, Maneuver};
use crate::state::VehicleState;
use crate::sweep::SensorSweep;

/// Pluggable per-vehicle behavior.
///
/// Implement this trait to change how vehicles react to their sensors.  All
/// methods receive a read-only [`DriveContext`] and the vehicle's own
/// deterministic RNG, so behavior never depends on update order.
pub trait DriverModel: Send + Sync + 'static {
    /// Called once per live vehicle per tick.
    ///
    /// Return the maneuvers to apply.  An empty `Vec` means "hold course":
    /// the vehicle keeps accelerating toward its top speed along its current
    /// heading.
    fn steer(
        &self,
        vehicle: VehicleId,
        state:   &VehicleState,
        ctx:     &DriveContext<'_>,
        rng:     &mut VehicleRng,
    ) -> Vec<Maneuver>;
}

/// A [`DriverModel`] that never steers.  Vehicles roll straight ahead
/// forever — useful for integration plumbing tests.
pub struct NoopDriver;

impl DriverModel for NoopDriver {
    fn steer(
        &self,
        _vehicle: VehicleId,
        _state:   &VehicleState,
        _ctx:     &DriveContext<'_>,
        _rng:     &mut VehicleRng,
    ) -> Vec<Maneuver> {
        vec![]
    }
}

// ── SensorDriver ──────────────────────────────────────────────────────────────

/// The default driver: lane-keeping, intersection turning, and collision
/// avoidance from local ray sensing alone — no route plan, no global state.
///
/// # Per-tick decision
///
/// 1. **Front ray** drives the macro state:
///    - limit zone → despawn (the vehicle left the map);
///    - vehicle body → hard brake;
///    - edge gate, approach flag clear → enter the edge and re-arm;
///    - junction box, approach flag armed → pick an exit uniformly at
///      random among `exit_paths(...)` and reorient toward the nearest
///      admissible lane start of the chosen edge.
/// 2. **Diagonal rays** drive micro corrections: a boundary-line hit yaws
///    the heading a fixed step back toward the road interior.  The transit
///    line inverts per class — buses hug it, cars shy away from it.
pub struct SensorDriver;

impl DriverModel for SensorDriver {
    fn steer(
        &self,
        _vehicle: VehicleId,
        state:    &VehicleState,
        ctx:      &DriveContext<'_>,
        rng:      &mut VehicleRng,
    ) -> Vec<Maneuver> {
        let sweep = SensorSweep::scan(ctx.field, state, ctx.tuning);
        let mut maneuvers = Vec::new();

        if let Some(front) = &sweep.front {
            match &front.surface {
                SensedSurface::Limit(_) => {
                    // Terminal: nothing else matters this tick.
                    return vec![Maneuver::Despawn { reason: DespawnReason::LeftMap }];
                }
                SensedSurface::Vehicle(_) => {
                    maneuvers.push(Maneuver::HardBrake);
                }
                SensedSurface::Edge(edge) if !state.awaiting_exit => {
                    match self.enter_edge(edge, state, ctx) {
                        Ok(m) => maneuvers.push(m),
                        Err(reason) => return vec![Maneuver::Despawn { reason }],
                    }
                }
                SensedSurface::Intersection(node) if state.awaiting_exit => {
                    match self.choose_exit(node, state, ctx, rng) {
                        Ok(m) => maneuvers.push(m),
                        Err(reason) => return vec![Maneuver::Despawn { reason }],
                    }
                }
                _ => {}
            }
        }

        if let Some(radians) = side_correction(&sweep.left, Side::Left, state.spec.class, ctx) {
            maneuvers.push(Maneuver::YawBy { radians });
        }
        if let Some(radians) = side_correction(&sweep.right, Side::Right, state.spec.class, ctx) {
            maneuvers.push(Maneuver::YawBy { radians });
        }

        maneuvers
    }
}

impl SensorDriver {
    /// Arrival onto `edge`: reorient toward its directional entry.
    ///
    /// The target is the waypoint *after* the nearest lane start, so the new
    /// heading settles along the lane instead of pivoting around the entry
    /// point itself.
    fn enter_edge(
        &self,
        edge: &str,
        state: &VehicleState,
        ctx: &DriveContext<'_>,
    ) -> Result<Maneuver, DespawnReason> {
        let start = ctx
            .guide
            .nearest_lane_start(edge, state.spec.class, state.position)
            .map_err(|_| DespawnReason::NoLaneStart)?;
        let start_node = ctx.guide.node(start);
        let target = match start_node.outgoing().first() {
            Some(&next) => ctx.guide.node(next).position,
            None => start_node.position,
        };
        Ok(Maneuver::EnterEdge { edge: edge.to_owned(), target })
    }

    /// Exit decision at intersection `node`.
    fn choose_exit(
        &self,
        node: &str,
        state: &VehicleState,
        ctx: &DriveContext<'_>,
        rng: &mut VehicleRng,
    ) -> Result<Maneuver, DespawnReason> {
        // The arrival edge is excluded from the candidates; a vehicle that
        // somehow approaches with a node location simply excludes nothing.
        let arrival = state.location.edge().unwrap_or("");
        let exits = ctx
            .map
            .exit_paths(node, arrival, state.spec.class)
            .map_err(|_| DespawnReason::NoExitPath)?;

        let Some(choice) = rng.choose(&exits).copied() else {
            return Err(DespawnReason::NoExitPath);
        };

        let target = self.lane_start_target(choice, state.spec.class, state.position, ctx)?;
        Ok(Maneuver::TurnOnto { edge: choice.to_owned(), target })
    }

    fn lane_start_target(
        &self,
        edge: &str,
        class: TransportClass,
        from: Vec2,
        ctx: &DriveContext<'_>,
    ) -> Result<Vec2, DespawnReason> {
        let start = ctx
            .guide
            .nearest_lane_start(edge, class, from)
            .map_err(|_| DespawnReason::NoLaneStart)?;
        Ok(ctx.guide.node(start).position)
    }
}

// ── Side-ray corrections ──────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Yaw step for one diagonal ray, if its hit demands a correction.
///
/// Positive radians turn left (counter-clockwise).  A boundary on the left
/// steers right and vice versa; the transit line inverts for public
/// vehicles, which turn *toward* it to stay in the bus lane.
fn side_correction(
    hit: &Option<tf_sensor::RayHit>,
    side: Side,
    class: TransportClass,
    ctx: &DriveContext<'_>,
) -> Option<f32> {
    let Some(hit) = hit else { return None };
    let SensedSurface::Boundary(line) = &hit.surface else {
        return None;
    };

    let step = ctx.tuning.yaw_correction;
    let away = match side {
        Side::Left  => -step, // boundary to the left → steer right
        Side::Right => step,
    };
    Some(match line {
        BoundaryLine::TransitLine if class == TransportClass::Public => -away,
        _ => away,
    })
}
