//! Player Events
//!
//! Event-based communication for view synchronization. The controller queues
//! an event whenever observable state changes; hosts drain the queue after
//! each handled input and fan the events out to views.

use crate::types::{PlaybackState, SequencingMode};
use melody_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Derived playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current track changed
    TrackChanged {
        /// ID of the new current track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Elapsed or total time changed
    PositionUpdate {
        /// Position in seconds
        elapsed_seconds: f64,
        /// Track length in seconds
        total_seconds: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume (0.0 - 1.0)
        volume: f32,
    },

    /// Shuffle or repeat changed
    SequencingChanged {
        /// New sequencing mode
        mode: SequencingMode,
    },

    /// Track list replaced or extended
    TrackListChanged {
        /// New track list length
        length: usize,
    },

    /// Sleep timer armed, disarmed or expired
    SleepTimerChanged {
        /// Armed minutes, `None` when cleared
        minutes: Option<u32>,
    },

    /// Playback failed to start
    Error {
        /// Error message
        message: String,
    },
}

impl PlayerEvent {
    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PlayerEvent::StateChanged {
            state: PlaybackState::Playing,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"StateChanged":{"state":"Playing"}}"#);
    }

    #[test]
    fn only_error_events_are_errors() {
        assert!(PlayerEvent::Error {
            message: "blocked".to_string()
        }
        .is_error());
        assert!(!PlayerEvent::TrackListChanged { length: 0 }.is_error());
    }
}
