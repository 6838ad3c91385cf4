//! The `Sim` struct and its tick loop.

use tf_core::{SimClock, SimConfig, SimRng, Tick, VehicleId};
use tf_guide::GuideNetwork;
use tf_map::{RoadMap, RoadProfile};
use tf_sensor::{Scene, SceneView, VehicleIndex, VehiclePoint};
use tf_vehicle::{
    DespawnReason, DriveContext, DriverModel, Location, Maneuver, SensorTuning,
};

use crate::observer::SimObserver;
use crate::registry::VehicleRegistry;
use crate::spawn::Spawner;
use crate::SimResult;

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Despawn counters, split by reason.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Vehicles that reached a map boundary — the normal end of life.
    pub left_map: u64,
    /// Vehicles destroyed at an intersection with no viable exit.
    pub no_exit_path: u64,
    /// Vehicles destroyed because their chosen exit had no lane start.
    pub no_lane_start: u64,
}

impl SimStats {
    pub fn despawned(&self) -> u64 {
        self.left_map + self.no_exit_path + self.no_lane_start
    }

    fn count(&mut self, reason: DespawnReason) {
        match reason {
            DespawnReason::LeftMap     => self.left_map += 1,
            DespawnReason::NoExitPath  => self.no_exit_path += 1,
            DespawnReason::NoLaneStart => self.no_lane_start += 1,
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns every piece of simulation state: the immutable world (map, guide
/// network, scene), the live population, the spawner, and the clock.  There
/// is no global state anywhere — pause it, step it, drop it, run two side by
/// side.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: DriverModel> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and the fixed step.
    pub clock: SimClock,

    /// The road graph.  Read-only after map build.
    pub map: RoadMap,

    /// Derived lane guide network.
    pub guide: GuideNetwork,

    /// Static sensing geometry.
    pub scene: Scene,

    /// Road geometry constants the world was built with.
    pub profile: RoadProfile,

    /// Sensor geometry shared by all vehicles.
    pub tuning: SensorTuning,

    /// The live population.
    pub registry: VehicleRegistry,

    /// Population regulation.
    pub spawner: Spawner,

    /// The driver model.  Called once per live vehicle per tick.
    pub driver: D,

    /// While `true`, the spawner and all vehicles skip their per-tick logic;
    /// the clock still advances.
    pub paused: bool,

    /// Despawn counters.
    pub stats: SimStats,

    pub(crate) rng: SimRng,
}

impl<D: DriverModel> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Pause or resume.  Both the spawner and the vehicles honor the flag by
    /// skipping their per-tick logic.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    // ── One tick ──────────────────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        if !self.paused {
            self.process_tick(now, observer)?;
        }

        observer.on_tick_end(now, self.registry.len());
        if self.config.output_interval_ticks > 0
            && now.0 % self.config.output_interval_ticks == 0
        {
            observer.on_snapshot(now, &self.registry);
        }

        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: rebuild the vehicle spatial index ─────────────────────
        //
        // O(N log N) bulk load over the live population, reused for every
        // sensor cast and the spawn vacancy check this tick.
        let mut index = build_index(&self.registry);

        // ── Phase 2: one throttled spawn attempt ──────────────────────────
        if let Some(id) = self.spawner.tick(
            now,
            &self.clock,
            &self.map,
            &self.guide,
            &index,
            &mut self.registry,
            &mut self.rng,
        ) {
            if let Some(state) = self.registry.get(id) {
                observer.on_spawn(now, id, state);
            }
            // The newcomer must be sensable this very tick.
            index = build_index(&self.registry);
        }

        // ── Phase 3: produce (drivers read, never write) ──────────────────
        //
        // Ascending slot order; each vehicle gets a view that excludes its
        // own body.  Explicit field borrows so the borrow checker sees the
        // registry (mutable, for the RNG) and the world (shared) disjointly.
        let scene = &self.scene;
        let map = &self.map;
        let guide = &self.guide;
        let tuning = &self.tuning;
        let dt_secs = self.clock.dt_secs();
        let driver = &self.driver;

        let ids = self.registry.ids();
        let mut decisions: Vec<(VehicleId, Vec<Maneuver>)> = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(slot) = self.registry.slot_mut(id) else {
                continue;
            };
            let view = SceneView { scene, vehicles: &index, exclude: Some(id) };
            let ctx = DriveContext {
                tick: now,
                dt_secs,
                map,
                guide,
                field: &view,
                tuning,
            };
            let maneuvers = driver.steer(id, &slot.state, &ctx, &mut slot.rng);
            decisions.push((id, maneuvers));
        }

        // ── Phase 4: apply (sequential, ascending id) ─────────────────────
        for (id, maneuvers) in decisions {
            self.apply(id, maneuvers, dt_secs, now, observer);
        }

        Ok(())
    }

    /// Apply one vehicle's maneuvers, then integrate speed and position.
    fn apply<O: SimObserver>(
        &mut self,
        id: VehicleId,
        maneuvers: Vec<Maneuver>,
        dt_secs: f32,
        now: Tick,
        observer: &mut O,
    ) {
        let mut braked = false;

        for maneuver in maneuvers {
            match maneuver {
                // ── Despawn: remove and stop processing this vehicle ───────
                Maneuver::Despawn { reason } => {
                    if let Some(state) = self.registry.despawn(id) {
                        self.stats.count(reason);
                        if reason.is_fault() {
                            log::warn!(
                                "vehicle {id} ({}) despawned: {reason}",
                                state.spec.name
                            );
                        }
                        observer.on_despawn(now, id, reason, &state);
                    }
                    return;
                }

                Maneuver::HardBrake => braked = true,

                Maneuver::EnterEdge { edge, target } => {
                    if let Some(state) = self.registry.get_mut(id) {
                        state.location = Location::Edge(edge);
                        if let Some(heading) = (target - state.position).normalized() {
                            state.heading = heading;
                        }
                        state.awaiting_exit = true;
                    }
                }

                Maneuver::TurnOnto { edge, target } => {
                    if let Some(state) = self.registry.get_mut(id) {
                        state.location = Location::Edge(edge);
                        if let Some(heading) = (target - state.position).normalized() {
                            state.heading = heading;
                        }
                        state.awaiting_exit = false;
                    }
                }

                Maneuver::YawBy { radians } => {
                    if let Some(state) = self.registry.get_mut(id) {
                        state.heading = state.heading.rotated(radians);
                    }
                }
            }
        }

        // ── Integrate ──────────────────────────────────────────────────────
        if let Some(state) = self.registry.get_mut(id) {
            state.speed = if braked {
                0.0
            } else {
                (state.speed + state.spec.acceleration * dt_secs).min(state.spec.max_speed)
            };
            state.position = state.position + state.heading * (state.speed * dt_secs);
        }
    }
}

/// Snapshot the live population into a fresh spatial index.
fn build_index(registry: &VehicleRegistry) -> VehicleIndex {
    VehicleIndex::build(
        registry
            .iter()
            .map(|(id, state)| VehiclePoint {
                id,
                position: state.position,
                radius: state.spec.radius(),
            })
            .collect(),
    )
}
