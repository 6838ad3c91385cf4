//! Simulation observer trait for progress reporting and data collection.

use tf_core::{Tick, VehicleId};
use tf_vehicle::{DespawnReason, VehicleState};

use crate::registry::VehicleRegistry;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — despawn logger
///
/// ```rust,ignore
/// struct DespawnPrinter;
///
/// impl SimObserver for DespawnPrinter {
///     fn on_despawn(&mut self, tick: Tick, id: VehicleId, reason: DespawnReason, _v: &VehicleState) {
///         println!("{tick}: {id} left ({reason})");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.  `live` is the population after the
    /// tick's spawns and despawns.
    fn on_tick_end(&mut self, _tick: Tick, _live: usize) {}

    /// Called when a vehicle spawns.
    fn on_spawn(&mut self, _tick: Tick, _id: VehicleId, _vehicle: &VehicleState) {}

    /// Called when a vehicle leaves the simulation — normally (`LeftMap`) or
    /// through a per-vehicle fault.
    fn on_despawn(
        &mut self,
        _tick: Tick,
        _id: VehicleId,
        _reason: DespawnReason,
        _vehicle: &VehicleState,
    ) {
    }

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks, unless 0).  Read-only access to the whole population so output
    /// writers can record positions without the sim knowing the format.
    fn on_snapshot(&mut self, _tick: Tick, _registry: &VehicleRegistry) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
