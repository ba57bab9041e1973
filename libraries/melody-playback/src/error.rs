//! Error types for playback management

use crate::media::MediaError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The media element refused to start playback
    #[error("Playback failed to start: {0}")]
    StartFailed(#[from] MediaError),
}

/// Errors surfaced by a [`PlayerHandle`](crate::PlayerHandle)
#[derive(Debug, Error)]
pub enum SessionError {
    /// The handle outlived the session that owns the controller
    #[error("Player session is not running")]
    Closed,

    /// The controller rejected the operation
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Result type for session handle calls
pub type SessionResult<T> = std::result::Result<T, SessionError>;
