//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Trait implemented by output backends (CSV today; the observer is backend
/// agnostic).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
