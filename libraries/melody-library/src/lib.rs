//! Melody Player - Library collaborators
//!
//! State that sits beside the playback controller and never sequences
//! anything itself:
//! - [`PlaylistCollection`]: named playlists, held in memory
//! - [`EqualizerSettings`]: ten band gains and the fixed presets
//! - [`search_tracks`]: case-insensitive filtering of a track list
//!
//! Playing a playlist hands the controller a copy of its tracks
//! ([`PlaylistCollection::tracks_for_playback`]); the collection is never
//! shared with it.

mod equalizer;
mod error;
mod playlists;
mod search;

pub use equalizer::{
    EqualizerPreset, EqualizerSettings, BAND_COUNT, BAND_LABELS, MAX_GAIN, MIN_GAIN,
};
pub use error::{LibraryError, Result};
pub use playlists::PlaylistCollection;
pub use search::search_tracks;
