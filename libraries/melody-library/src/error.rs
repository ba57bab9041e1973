//! Error types for library state

use thiserror::Error;

/// Library errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// No equalizer preset has this name
    #[error("Unknown equalizer preset: {0}")]
    UnknownPreset(String),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;
