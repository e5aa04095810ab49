//! Error handling for the wavelet tree.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for wavelet tree operations
#[derive(Debug, thiserror::Error)]
pub enum WaveletError {
    /// Error opening, creating or mapping a file
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// A query position past the end of the indexed sequence
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The bitmap store has no room left for a node bitmap
    #[error("Bitmap storage exhausted: requested {requested} bytes, {available} available")]
    StorageExhausted { requested: usize, available: usize },

    /// A read outside the committed region of the bitmap store
    #[error("Bitmap read at offset {offset} (+{len}) beyond committed {used} bytes")]
    StorageRange {
        offset: usize,
        len: usize,
        used: usize,
    },

    /// Node table and stored bitmaps disagree
    #[error("Corrupted wavelet tree: {0}")]
    Corrupted(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WaveletError {
    /// Create an IO error with a message and no underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping an underlying `io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => {
                let path = path.into();
                Self::Io {
                    message: format!("{message}: {}", path.display()),
                    path: Some(path),
                    source,
                }
            }
            other => other,
        }
    }

    /// The path associated with this error, if any
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

impl From<io::Error> for WaveletError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

/// Result type for wavelet tree operations
pub type Result<T> = std::result::Result<T, WaveletError>;
