//! Error types for the focus-lock pipeline

use thiserror::Error;

/// Result type alias for the pipeline crate
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur at the pipeline boundary
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Detector failed: {0}")]
    Detector(String),

    #[error("Tracker update failed: {0}")]
    Tracker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid frame data: {0}")]
    InvalidFrame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn detector<S: Into<String>>(msg: S) -> Self {
        Self::Detector(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_frame<S: Into<String>>(msg: S) -> Self {
        Self::InvalidFrame(msg.into())
    }
}
