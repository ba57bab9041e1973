//! Melody Player Core
//!
//! Platform-agnostic domain types shared by the playback controller, the
//! library collaborators (playlists, equalizer, search) and the host
//! applications.
//!
//! # Example
//!
//! ```rust
//! use melody_core::{format_duration, Playlist, Track, TrackId};
//! use std::time::Duration;
//!
//! let track = Track {
//!     id: TrackId::new("1"),
//!     title: "Chill Vibes".to_string(),
//!     artist: "Demo Artist".to_string(),
//!     album: "Sample Album".to_string(),
//!     duration: Duration::from_secs(180),
//!     source: "/audio/chill-vibes.mp3".to_string(),
//!     artwork: None,
//!     lyrics: None,
//! };
//!
//! let mut playlist = Playlist::new("Evening");
//! playlist.tracks.push(track);
//!
//! assert_eq!(format_duration(playlist.tracks[0].duration), "3:00");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod format;
pub mod types;

pub use format::{format_duration, format_seconds};
pub use types::{Playlist, PlaylistId, Track, TrackId};
