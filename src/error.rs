use thiserror::Error;

/// Everything that can go wrong while saving, converting or running a model.
///
/// Shape errors inside `Matrix` arithmetic are programmer errors and still
/// panic; this enum only covers data that comes from outside the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The compact byte stream is truncated, has a bad header, or carries
    /// trailing garbage.
    #[error("invalid compact model: {0}")]
    InvalidFormat(String),

    /// The full-precision model uses something the converter cannot express.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
