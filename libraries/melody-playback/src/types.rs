//! Core types for playback management

use crate::sleep_timer::TimerToken;
use melody_core::Track;
use serde::{Deserialize, Serialize};

/// Playback state
///
/// Derived from the current track and the playing flag; it is never stored
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current track
    Empty,

    /// A track is selected but not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop at the end of the track list
    #[default]
    Off,

    /// Loop the entire track list
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `Off → All → One → Off` cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Lowercase label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

/// Shuffle/repeat configuration governing next, previous and track end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencingMode {
    /// Pick a uniformly random index on next/previous
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,
}

/// Transport state reported to views
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportState {
    /// Whether the media element last confirmed playback
    pub playing: bool,

    /// Position in the loaded track (seconds)
    pub elapsed_seconds: f64,

    /// Length of the loaded track (seconds, 0 when unknown)
    pub total_seconds: f64,

    /// Output volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            playing: false,
            elapsed_seconds: 0.0,
            total_seconds: 0.0,
            volume: 1.0,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0, default: 1.0)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Seed for shuffle selection; entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            shuffle_seed: None,
        }
    }
}

/// Read-only view of everything the controller owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Derived playback state
    pub state: PlaybackState,

    /// Current track
    pub current_track: Option<Track>,

    /// Cursor into the track list (`None` when the list is empty)
    pub cursor: Option<usize>,

    /// Current track list
    pub track_list: Vec<Track>,

    /// Transport state
    pub transport: TransportState,

    /// Shuffle/repeat configuration
    pub sequencing: SequencingMode,

    /// Minutes the armed sleep timer was set to
    pub sleep_timer_minutes: Option<u32>,

    /// Token of the armed sleep timer
    pub sleep_timer_token: Option<TimerToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 1.0);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn repeat_cycles_off_all_one() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: PlaybackConfig =
            serde_json::from_str(r#"{ "repeat": "all", "shuffle_seed": 7 }"#).unwrap();
        assert_eq!(config.repeat, RepeatMode::All);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.volume, 1.0);
    }
}
