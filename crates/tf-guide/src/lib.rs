//! `tf-guide` — the derived per-lane guide-node network.
//!
//! Generated once from a [`tf_map::RoadMap`] at map-build time and immutable
//! afterward.  Vehicles do **not** traverse this graph — they rediscover it
//! every tick through sensing — but the spawner and the exit-selection logic
//! query it for lane start points, and drawing collaborators walk it to
//! render lane guides.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`node`]    | `GuideId`, `GuideKind`, `GuideNode`                       |
//! | [`layout`]  | Per-direction lane geometry (offsets, axes)               |
//! | [`network`] | `GuideNetwork` generation pass and query surface          |
//! | [`error`]   | `GuideError`, `GuideResult<T>`                            |

pub mod error;
pub mod layout;
pub mod network;
pub mod node;


pub use error::{GuideError, GuideResult};
pub use layout::DirectionGeometry;
pub use network::{GuideNetwork, LaneGuide};
pub use node::{GuideId, GuideKind, GuideNode};
