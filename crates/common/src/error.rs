//! Error types shared across mkmovies crates.

use std::path::PathBuf;

/// Top-level error type for mkmovies operations.
#[derive(Debug, thiserror::Error)]
pub enum MkmoviesError {
    #[error("Discovery error: {message}")]
    Discovery { message: String },

    #[error("Failed to create staging directory (rc = {code})")]
    StagingDir { code: i32 },

    #[error("Failed to link {target} -> {link} (rc = {code})")]
    Link {
        target: PathBuf,
        link: PathBuf,
        code: i32,
    },

    #[error("No image files found in group")]
    NoImages,

    #[error("Failed to remove staging directory {path} (rc = {code})")]
    Cleanup { path: PathBuf, code: i32 },

    #[error("Encoder error: {message}")]
    Encoder { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MkmoviesError.
pub type MkmoviesResult<T> = Result<T, MkmoviesError>;

impl MkmoviesError {
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery {
            message: msg.into(),
        }
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder {
            message: msg.into(),
        }
    }
}
