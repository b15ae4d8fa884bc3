//! Error types shared across Cutframe crates.

use std::path::PathBuf;

/// Top-level error type for Cutframe operations.
///
/// The timeline algorithms themselves never fail; this type covers the
/// edges around them (configuration, telemetry files, frame planning).
#[derive(Debug, thiserror::Error)]
pub enum CutframeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Telemetry error: {message}")]
    Telemetry { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CutframeError.
pub type CutframeResult<T> = Result<T, CutframeError>;

impl CutframeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }
}
