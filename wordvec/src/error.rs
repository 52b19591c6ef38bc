//! Error types for wordvec

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying pretrained vectors
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A required vector file does not exist
    #[error("Vector file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The vector file was rejected by the format reader
    #[error("Load error: {0}")]
    Load(String),

    /// Malformed argument or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Download or unzip of a remote archive failed
    #[error("Download error: {0}")]
    Download(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`EmbeddingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    LoadError,
    InvalidInput,
}

impl EmbeddingError {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Create a download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::Load(_) | Self::Download(_) | Self::Io(_) => ErrorKind::LoadError,
            Self::InvalidInput(_) | Self::Json(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for wordvec operations
pub type Result<T> = std::result::Result<T, EmbeddingError>;
