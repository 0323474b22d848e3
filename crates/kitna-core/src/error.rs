use thiserror::Error;

use crate::catalog::InputMode;

#[derive(Error, Debug)]
pub enum KitnaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown voice unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown input mode: {0}")]
    UnknownMode(String),

    #[error("Model '{id}' is not in the {mode} catalog")]
    UnknownModel { id: String, mode: InputMode },

    #[error("Model '{id}' cannot be priced in {mode} mode")]
    ModelModeMismatch { id: String, mode: InputMode },

    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transcription failed: {0}")]
    Transcription(String),
}

pub type Result<T> = std::result::Result<T, KitnaError>;
