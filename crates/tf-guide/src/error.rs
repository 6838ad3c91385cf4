//! Guide-subsystem error type.

use thiserror::Error;

use tf_map::MapError;

/// Errors produced by `tf-guide`.
#[derive(Debug, Error)]
pub enum GuideError {
    /// The edge exists but has no lane-start point admitting the requested
    /// class.  Callers must treat this as a per-vehicle failure, never
    /// proceed with a fabricated target.
    #[error("edge {edge:?} has no lane start admitting {class}")]
    NoLaneStart { edge: String, class: tf_core::TransportClass },

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type GuideResult<T> = Result<T, GuideError>;
