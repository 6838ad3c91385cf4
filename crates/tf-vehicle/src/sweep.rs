//! The three-ray sensor sweep.

use tf_sensor::{RayHit, SensorField};

use crate::spec::SensorTuning;
use crate::state::VehicleState;

/// One tick's sensor readings: front, left-diagonal, and right-diagonal
/// rays, all cast from the vehicle's forward-offset point.
#[derive(Clone, Debug, Default)]
pub struct SensorSweep {
    pub front: Option<RayHit>,
    pub left: Option<RayHit>,
    pub right: Option<RayHit>,
}

impl SensorSweep {
    /// Cast the three rays for `state` against `field`.
    pub fn scan(field: &dyn SensorField, state: &VehicleState, tuning: &SensorTuning) -> Self {
        let origin = state.position + state.heading * tuning.forward_offset;
        let left_dir  = state.heading.rotated(tuning.side_angle);
        let right_dir = state.heading.rotated(-tuning.side_angle);

        Self {
            front: field.cast(origin, state.heading, tuning.sense_radius),
            left:  field.cast(origin, left_dir, tuning.sense_radius),
            right: field.cast(origin, right_dir, tuning.sense_radius),
        }
    }
}
