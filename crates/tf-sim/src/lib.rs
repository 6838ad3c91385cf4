//! `tf-sim` — tick loop orchestrator for the rust_tf framework.
//!
//! # Tick phases
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   (paused? skip everything below; the clock still advances)
//!   ① Index    — rebuild the vehicle R-tree from live positions.
//!   ② Spawn    — one throttled spawn attempt (population regulation).
//!   ③ Produce  — DriverModel::steer for every live vehicle, ascending id;
//!                drivers only read (map, guide, scene, index).
//!   ④ Apply    — maneuvers, speed ramp, position integration, despawns —
//!                sequential, ascending id, fully deterministic.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tf_sim::{NoopObserver, SimBuilder};
//! use tf_vehicle::SensorDriver;
//!
//! let mut sim = SimBuilder::new(config, map, SensorDriver).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod registry;
pub mod sim;
pub mod spawn;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use registry::{ClassCounts, VehicleRegistry};
pub use sim::{Sim, SimStats};
pub use spawn::{EntryNodeInfo, SpawnConfig, SpawnStats, Spawner};
