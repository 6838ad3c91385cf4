use thiserror::Error;

use tf_map::MapError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type SimResult<T> = Result<T, SimError>;
