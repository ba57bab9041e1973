//! Melody Player - Playback Control
//!
//! The single authority over what is playing in Melody Player.
//!
//! This crate provides:
//! - Transport control (play, pause, toggle, seek, volume)
//! - Track list and cursor management
//! - Shuffle and repeat sequencing (Off, All, One)
//! - A sleep timer that pauses playback after a number of minutes
//! - Upload ingestion (audio files become tracks)
//! - An async session that serializes commands and broadcasts events
//!
//! # Architecture
//!
//! `melody-playback` does not decode or output audio. The host supplies a
//! [`MediaElement`] (browser audio element, native sink, simulated clock)
//! and forwards that element's progress callbacks as [`MediaSignal`]s.
//! [`PlaybackController`] is synchronous and single-threaded;
//! [`PlayerSession`] runs one on a tokio task and hands out
//! [`PlayerHandle`]s to every view that needs playback.
//!
//! # Example: Direct control
//!
//! ```rust
//! use melody_core::{Track, TrackId};
//! use melody_playback::{MediaElement, MediaError, PlaybackController, PlaybackConfig};
//! use melody_playback::types::PlaybackState;
//! use std::time::Duration;
//!
//! struct Silent;
//!
//! impl MediaElement for Silent {
//!     fn set_source(&mut self, _locator: &str) {}
//!     fn play(&mut self) -> Result<(), MediaError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//! }
//!
//! let track = Track {
//!     id: TrackId::new("1"),
//!     title: "Midnight Dreams".to_string(),
//!     artist: "Luna Eclipse".to_string(),
//!     album: "Nocturnal Vibes".to_string(),
//!     duration: Duration::from_secs(245),
//!     source: "/music/midnight-dreams.mp3".to_string(),
//!     artwork: None,
//!     lyrics: None,
//! };
//!
//! let mut controller = PlaybackController::with_media(PlaybackConfig::default(), Box::new(Silent));
//! controller.set_current_playlist(vec![track], 0);
//! assert_eq!(controller.state(), PlaybackState::Paused);
//!
//! controller.toggle_play_pause().unwrap();
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! ```
//!
//! # Example: Session
//!
//! ```rust,no_run
//! use melody_playback::{PlaybackController, PlayerSession};
//!
//! # async fn run() -> Result<(), melody_playback::SessionError> {
//! let (player, task) = PlayerSession::spawn(PlaybackController::default());
//! let mut events = player.subscribe();
//!
//! player.toggle_repeat().await?;
//! player.set_sleep_timer(Some(30)).await?;
//! let _event = events.recv().await;
//!
//! player.shutdown().await?;
//! let _controller = task.await;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
mod events;
mod media;
pub mod sequencing;
mod session;
pub mod sleep_timer;
pub mod types;
pub mod upload;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result, SessionError, SessionResult};
pub use events::PlayerEvent;
pub use media::{MediaElement, MediaError, MediaSignal};
pub use session::{PlayerHandle, PlayerSession};
pub use sleep_timer::{SleepTimer, TimerToken};
pub use types::{
    PlaybackConfig, PlaybackState, PlayerSnapshot, RepeatMode, SequencingMode, TransportState,
};
pub use upload::{tracks_from_uploads, UploadedFile};
