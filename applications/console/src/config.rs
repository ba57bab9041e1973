/// Console configuration
use crate::error::{ConsoleError, Result};
use melody_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "melody.toml";

/// Environment variable prefix (`MELODY_MEDIA__TICK_INTERVAL_MS=250`)
pub const ENV_PREFIX: &str = "MELODY";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub media: MediaSettings,

    #[serde(default)]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaSettings {
    /// How often the simulated clock advances
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Length reported for every simulated source
    #[serde(default = "default_track_seconds")]
    pub track_seconds: f64,

    /// File extensions the simulated element can play
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Seed the track list with the demo tracks at startup
    #[serde(default)]
    pub demo_tracks: bool,
}

impl MediaSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            track_seconds: default_track_seconds(),
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `melody.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with MELODY_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.media.tick_interval_ms == 0 {
            return Err(ConsoleError::Config(
                "media.tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConsoleError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        if !self.media.track_seconds.is_finite() || self.media.track_seconds <= 0.0 {
            return Err(ConsoleError::Config(
                "media.track_seconds must be a positive number".to_string(),
            ));
        }

        if self.media.accepted_extensions.is_empty() {
            return Err(ConsoleError::Config(
                "media.accepted_extensions must list at least one extension".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_track_seconds() -> f64 {
    180.0
}

fn default_accepted_extensions() -> Vec<String> {
    ["mp3", "flac", "ogg", "wav", "m4a", "opus"]
        .into_iter()
        .map(String::from)
        .collect()
}
