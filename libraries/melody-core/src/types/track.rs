/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable track
///
/// Tracks are values: playlists and the playback track list hold their own
/// copies, and the same track may appear more than once in either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier (uploads get a generated one)
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Track length, zero when unknown
    pub duration: Duration,

    /// Locator handed to the media element
    pub source: String,

    /// Artwork locator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,

    /// Lyrics text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

impl Track {
    /// Whether the track length is known
    pub fn has_duration(&self) -> bool {
        !self.duration.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_tracks_have_unknown_duration() {
        let track = Track {
            id: TrackId::new("uploaded-1-0"),
            title: "demo".to_string(),
            artist: "Unknown Artist".to_string(),
            album: "Uploaded Music".to_string(),
            duration: Duration::ZERO,
            source: "blob:demo".to_string(),
            artwork: None,
            lyrics: None,
        };
        assert!(!track.has_duration());

        let json = serde_json::to_value(&track).unwrap();
        assert!(json.get("artwork").is_none());
        assert!(json.get("lyrics").is_none());
    }
}
