//! `tf-vehicle` — vehicle state and the sensor-driven driver model.
//!
//! # Produce, then apply
//!
//! Drivers never mutate anything.  Each tick the simulation calls
//! [`DriverModel::steer`] with a read-only [`DriveContext`] and the
//! vehicle's own RNG; the driver senses the world (three rays: front,
//! left-diagonal, right-diagonal) and returns a list of [`Maneuver`]s.  The
//! sim applies them afterwards, in ascending vehicle-id order, which keeps
//! runs deterministic no matter how drivers are implemented.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`spec`]     | `VehicleSpec` archetypes, `SensorTuning`                |
//! | [`state`]    | `VehicleState`, `Location`                              |
//! | [`sweep`]    | `SensorSweep` — the three-ray scan                      |
//! | [`maneuver`] | `Maneuver`, `DespawnReason`                             |
//! | [`driver`]   | `DriverModel` trait, `SensorDriver`, `NoopDriver`       |
//! | [`context`]  | `DriveContext` — per-tick read-only borrows             |

pub mod context;
pub mod driver;
pub mod maneuver;
pub mod spec;
pub mod state;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use context::DriveContext;
pub use driver::{DriverModel, NoopDriver, SensorDriver};
pub use maneuver::{DespawnReason, Maneuver};
pub use spec::{SensorTuning, VehicleSpec};
pub use state::{Location, VehicleState};
pub use sweep::SensorSweep;
