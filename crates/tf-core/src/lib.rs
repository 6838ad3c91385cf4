//! `tf-core` — foundational types for the `rust_tf` traffic-flow framework.
//!
//! This crate is a dependency of every other `tf-*` crate.  It intentionally
//! has no `tf-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).  Errors are domain-specific here, so each sub-crate
//! defines its own `thiserror` enum instead of sharing a base type.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geom`]        | `Vec2`, angles, Bezier curves, segment intersection   |
//! | [`ids`]         | `VehicleId`                                           |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`transport`]   | `TransportClass`, `TransportFilter` enums             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geom::Vec2;
pub use ids::VehicleId;
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, SimConfig, Tick};
pub use transport::{TransportClass, TransportFilter};
