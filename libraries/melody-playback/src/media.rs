//! Media element abstraction
//!
//! The controller drives exactly one playable resource. Hosts provide it by
//! implementing [`MediaElement`] (a browser audio element, a native sink, a
//! simulated clock) and feed the resource's progress callbacks back in as
//! [`MediaSignal`]s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a media element can refuse to start playback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The source format cannot be played
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Playback is not permitted yet (e.g. no user gesture)
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    /// No source has been assigned
    #[error("No source loaded")]
    NoSource,

    /// Any other platform failure
    #[error("{0}")]
    Other(String),
}

/// The single playable resource owned by the playback controller
///
/// Implementations must be cheap to call repeatedly: the controller pushes
/// volume before every start attempt and does not deduplicate pauses.
pub trait MediaElement: Send {
    /// Assign the locator to play next; implementations should stop any
    /// current playback and rewind
    fn set_source(&mut self, locator: &str);

    /// Start or resume playback of the assigned source
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pause playback (idempotent)
    fn pause(&mut self);

    /// Move the playback position, in seconds
    ///
    /// Bounds are enforced by the implementation, not the controller.
    fn set_current_time(&mut self, seconds: f64);

    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Progress callbacks reported by a media element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaSignal {
    /// Playback position changed (seconds)
    TimeUpdate(f64),

    /// Total length of the loaded source became known (seconds)
    DurationChange(f64),

    /// The loaded source played to its natural end
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_errors_render_their_reason() {
        assert_eq!(
            MediaError::UnsupportedFormat("song.xyz".to_string()).to_string(),
            "Unsupported format: song.xyz"
        );
        assert_eq!(MediaError::NoSource.to_string(), "No source loaded");
    }
}
