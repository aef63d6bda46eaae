//! Error types shared across CallMap crates.

use std::path::PathBuf;

/// Top-level error type for CallMap operations.
#[derive(Debug, thiserror::Error)]
pub enum CallmapError {
    #[error("No visible window titled '{title}' ({} windows available)", available.len())]
    WindowNotFound {
        title: String,
        /// Titles of every visible window at lookup time, for re-prompting.
        available: Vec<String>,
    },

    #[error("An empty string was passed instead of a window title")]
    EmptyTitle,

    #[error("No camera tiles detected")]
    NoTilesDetected,

    #[error("Capture failed: {message}")]
    CaptureFailed { message: String },

    #[error("Failed to persist {path}: {message}")]
    PersistenceFailed { path: PathBuf, message: String },

    #[error("Unknown tile id: {id}")]
    UnknownTileId { id: u32 },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Preset error: {message}")]
    Preset { message: String },

    #[error("Relay error: {message}")]
    Relay { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CallmapError.
pub type CallmapResult<T> = Result<T, CallmapError>;

impl CallmapError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::CaptureFailed {
            message: msg.into(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::PersistenceFailed {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn preset(msg: impl Into<String>) -> Self {
        Self::Preset {
            message: msg.into(),
        }
    }

    pub fn relay(msg: impl Into<String>) -> Self {
        Self::Relay {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether the caller can retry or re-prompt instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::WindowNotFound { .. }
                | Self::EmptyTitle
                | Self::NoTilesDetected
                | Self::CaptureFailed { .. }
                | Self::PersistenceFailed { .. }
        )
    }
}
