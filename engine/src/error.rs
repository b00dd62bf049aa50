use thiserror::Error;

/// Errors surfaced by board construction, extraction and normalization.
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("computation error: {0}")]
    Computation(String),

    #[error("illegal move '{mv}' in position '{fen}'")]
    IllegalMove { mv: String, fen: String },

    #[error("failed to read trained statistics: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse trained statistics: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RadarError>;
