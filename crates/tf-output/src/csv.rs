//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record([
            "vehicle_id",
            "spawn_serial",
            "tick",
            "class",
            "archetype",
            "x",
            "y",
            "speed",
            "location",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "unix_time_ms",
            "live",
            "spawned_total",
            "despawned_total",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle_id.to_string(),
                row.spawn_serial.to_string(),
                row.tick.to_string(),
                row.class.to_string(),
                row.archetype.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.speed.to_string(),
                row.location.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_ms.to_string(),
            row.live.to_string(),
            row.spawned_total.to_string(),
            row.despawned_total.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
