//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tf_core::{SimConfig, Tick, VehicleId};
use tf_sim::{SimObserver, VehicleRegistry};
use tf_vehicle::{DespawnReason, Location, VehicleState};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes vehicle snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    start_unix_ms:    i64,
    tick_duration_ms: u32,
    spawned_total:    u64,
    despawned_total:  u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_unix_ms:    config.start_unix_ms,
            tick_duration_ms: config.tick_duration_ms,
            spawned_total:    0,
            despawned_total:  0,
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time_ms(&self, tick: Tick) -> i64 {
        self.start_unix_ms + tick.0 as i64 * self.tick_duration_ms as i64
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_spawn(&mut self, _tick: Tick, _id: VehicleId, _vehicle: &VehicleState) {
        self.spawned_total += 1;
    }

    fn on_despawn(
        &mut self,
        _tick: Tick,
        _id: VehicleId,
        _reason: DespawnReason,
        _vehicle: &VehicleState,
    ) {
        self.despawned_total += 1;
    }

    fn on_tick_end(&mut self, tick: Tick, live: usize) {
        let row = TickSummaryRow {
            tick:            tick.0,
            unix_time_ms:    self.unix_time_ms(tick),
            live:            live as u64,
            spawned_total:   self.spawned_total,
            despawned_total: self.despawned_total,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, registry: &VehicleRegistry) {
        let rows: Vec<VehicleSnapshotRow> = registry
            .iter()
            .map(|(id, state)| VehicleSnapshotRow {
                vehicle_id:   id.0,
                spawn_serial: state.spawn_serial,
                tick:         tick.0,
                class:        state.spec.class.as_str(),
                archetype:    state.spec.name.clone(),
                x:            state.position.x,
                y:            state.position.y,
                speed:        state.speed,
                location:     match &state.location {
                    Location::Edge(id) | Location::Node(id) => id.clone(),
                },
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
