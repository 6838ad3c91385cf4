//! `tf-sensor` — typed ray-cast sensing.
//!
//! Vehicles perceive the world exclusively through
//! [`SensorField::cast`]: a ray in, at most one [`RayHit`] out.  The hit
//! carries a typed [`SensedSurface`] — never a name or tag string — so
//! driver logic switches on an enum the compiler checks.
//!
//! The trait is the seam to a real physics engine.  This crate also ships
//! the reference implementation the simulation runs on:
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`surface`] | `SensedSurface`, `BoundaryLine`, `RayHit`, `SensorField` |
//! | [`scene`]   | `Scene` — static geometry built from map + lane layout   |
//! | [`index`]   | `VehicleIndex` — per-tick R-tree of vehicle discs        |
//! | [`view`]    | `SceneView` — scene + vehicles as one `SensorField`      |

pub mod index;
mod ray;
pub mod scene;
pub mod surface;
pub mod view;

#[cfg(test)]
mod tests;

pub use index::{VehicleIndex, VehiclePoint};
pub use scene::Scene;
pub use surface::{BoundaryLine, RayHit, SensedSurface, SensorField};
pub use view::SceneView;
