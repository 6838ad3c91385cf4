//! Read-only world state passed to every driver callback.

use tf_core::Tick;
use tf_guide::GuideNetwork;
use tf_map::RoadMap;
use tf_sensor::SensorField;

use crate::spec::SensorTuning;

/// A read-only snapshot of the world passed to
/// [`DriverModel::steer`][crate::DriverModel::steer].
///
/// Built once per tick by the simulation loop and shared (immutably) across
/// all vehicle callbacks.  The sensor field borrow already reflects this
/// tick's vehicle index.
pub struct DriveContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// The fixed integration step in seconds.
    pub dt_secs: f32,

    /// The road graph (read-only after map build).
    pub map: &'a RoadMap,

    /// The derived guide network — lane-start lookups live here.
    pub guide: &'a GuideNetwork,

    /// This tick's sensing view, with the calling vehicle excluded.
    pub field: &'a dyn SensorField,

    /// Shared sensor geometry.
    pub tuning: &'a SensorTuning,
}
