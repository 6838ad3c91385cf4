//! `tf-output` — recording simulation runs.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`row`]      | `VehicleSnapshotRow`, `TickSummaryRow`                  |
//! | [`writer`]   | The `OutputWriter` backend trait                        |
//! | [`csv`]      | `CsvWriter` — two CSV files per run                     |
//! | [`observer`] | `SimOutputObserver` — bridges `SimObserver` to a writer |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                        |

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
