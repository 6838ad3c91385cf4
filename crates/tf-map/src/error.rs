//! Map-subsystem error type.

use thiserror::Error;

/// Errors produced by `tf-map`.
///
/// Note the asymmetry required by the data model: *inserts* with bad ids are
/// silent no-ops (logged, counted by the loader), while *queries* for
/// unknown ids fail loudly with one of the variants below.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("node {0:?} not found in map")]
    UnknownNode(String),

    #[error("edge {0:?} not found in map")]
    UnknownEdge(String),

    #[error("node {0:?} is not a limit node with an incident edge")]
    NotALimitNode(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MapResult<T> = Result<T, MapError>;
