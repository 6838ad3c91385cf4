//! Fluent builder for constructing a [`Sim`].

use tf_core::{SimConfig, SimRng};
use tf_guide::GuideNetwork;
use tf_map::{RoadMap, RoadProfile};
use tf_sensor::Scene;
use tf_vehicle::{DriverModel, SensorTuning, VehicleSpec};

use crate::registry::VehicleRegistry;
use crate::sim::{Sim, SimStats};
use crate::spawn::{SpawnConfig, Spawner};
use crate::{SimError, SimResult};

/// Fluent builder for [`Sim<D>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, tick duration, …
/// - [`RoadMap`] — the loaded road graph (see `tf_map::MapDocument`)
/// - `D: DriverModel` — the driver implementation (usually
///   [`tf_vehicle::SensorDriver`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                        |
/// |-----------------|--------------------------------|
/// | `.profile(p)`   | `RoadProfile::default()`       |
/// | `.tuning(t)`    | `SensorTuning::default()`      |
/// | `.spawning(s)`  | `SpawnConfig::default()`       |
/// | `.fleet(v)`     | `VehicleSpec::standard_fleet()`|
///
/// # Example
///
/// ```rust,ignore
/// let (map, _report) = document.build_map();
/// let mut sim = SimBuilder::new(config, map, SensorDriver)
///     .spawning(SpawnConfig { max_vehicles: 40, ..Default::default() })
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: DriverModel> {
    config: SimConfig,
    map: RoadMap,
    driver: D,
    profile: Option<RoadProfile>,
    tuning: Option<SensorTuning>,
    spawning: Option<SpawnConfig>,
    fleet: Option<Vec<VehicleSpec>>,
}

impl<D: DriverModel> SimBuilder<D> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, map: RoadMap, driver: D) -> Self {
        Self {
            config,
            map,
            driver,
            profile: None,
            tuning: None,
            spawning: None,
            fleet: None,
        }
    }

    /// Road geometry constants (lane width, clearances, …).
    pub fn profile(mut self, profile: RoadProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Sensor geometry (ray length, diagonal angle, yaw step).
    pub fn tuning(mut self, tuning: SensorTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Population regulation parameters.
    pub fn spawning(mut self, spawning: SpawnConfig) -> Self {
        self.spawning = Some(spawning);
        self
    }

    /// The archetype pool the spawner draws from.
    pub fn fleet(mut self, fleet: Vec<VehicleSpec>) -> Self {
        self.fleet = Some(fleet);
        self
    }

    /// Validate inputs, derive the guide network and scene, scan entry
    /// nodes, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<D>> {
        let profile = self.profile.unwrap_or_default();
        let tuning = self.tuning.unwrap_or_default();
        let spawning = self.spawning.unwrap_or_default();
        let fleet = self.fleet.unwrap_or_else(VehicleSpec::standard_fleet);

        // ── Validation ─────────────────────────────────────────────────────
        if self.config.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be > 0".into()));
        }
        if self.map.is_empty() {
            return Err(SimError::Config("road map has no nodes".into()));
        }
        if fleet.is_empty() {
            return Err(SimError::Config("vehicle fleet is empty".into()));
        }
        if !(0.0..=1.0).contains(&spawning.public_ratio) {
            return Err(SimError::Config(format!(
                "public_ratio {} outside [0, 1]",
                spawning.public_ratio
            )));
        }

        // ── Derived world ──────────────────────────────────────────────────
        let guide = GuideNetwork::generate(&self.map, &profile)?;
        let scene = Scene::build(&self.map, &profile)?;

        let clock = self.config.make_clock();
        let mut rng = SimRng::new(self.config.seed);
        let spawner = Spawner::new(spawning, fleet, &self.map, &clock, &mut rng)?;
        if spawner.entries().is_empty() {
            return Err(SimError::Config("road map has no entry nodes".into()));
        }

        Ok(Sim {
            registry: VehicleRegistry::new(self.config.seed),
            config: self.config,
            clock,
            map: self.map,
            guide,
            scene,
            profile,
            tuning,
            spawner,
            driver: self.driver,
            paused: false,
            stats: SimStats::default(),
            rng,
        })
    }
}
