//! Error types shared across vidcoord crates.
//!
//! Click rejections (letterbox bars, unresolved media size) are normal
//! outcomes and are modelled by the annotator, not by this type.

use std::path::PathBuf;

/// Top-level error type for vidcoord operations.
#[derive(Debug, thiserror::Error)]
pub enum VidcoordError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Video source error: {message}")]
    Source { message: String },

    #[error("Output channel error: {message}")]
    Output { message: String },

    #[error("Video file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using VidcoordError.
pub type VidcoordResult<T> = Result<T, VidcoordError>;

impl VidcoordError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
