//! Named playlist collection
//!
//! Playlists live only as long as the process. Every operation is total:
//! unknown ids report `false`/`None` instead of failing.

use melody_core::{Playlist, PlaylistId, Track, TrackId};
use tracing::debug;

/// Ordered set of playlists keyed by [`PlaylistId`]
#[derive(Debug, Clone, Default)]
pub struct PlaylistCollection {
    playlists: Vec<Playlist>,
}

impl PlaylistCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist and return its id
    ///
    /// Names are not validated here; the calling surface rejects empty ones.
    pub fn create(&mut self, name: impl Into<String>) -> PlaylistId {
        let playlist = Playlist::new(name);
        let id = playlist.id.clone();

        debug!(playlist = %id, name = %playlist.name, "Playlist created");
        self.playlists.push(playlist);
        id
    }

    /// Append `track` to a playlist (duplicates allowed)
    pub fn add_track(&mut self, id: &PlaylistId, track: Track) -> bool {
        let Some(playlist) = self.get_mut(id) else {
            return false;
        };

        playlist.tracks.push(track);
        true
    }

    /// Remove every entry of `track_id` from a playlist
    ///
    /// Returns whether the playlist exists, whether or not anything matched.
    pub fn remove_track(&mut self, id: &PlaylistId, track_id: &TrackId) -> bool {
        let Some(playlist) = self.get_mut(id) else {
            return false;
        };

        playlist.tracks.retain(|track| &track.id != track_id);
        true
    }

    /// Delete a playlist
    pub fn delete(&mut self, id: &PlaylistId) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|playlist| &playlist.id != id);

        let deleted = self.playlists.len() != before;
        if deleted {
            debug!(playlist = %id, "Playlist deleted");
        }
        deleted
    }

    /// Look up a playlist
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|playlist| &playlist.id == id)
    }

    fn get_mut(&mut self, id: &PlaylistId) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|playlist| &playlist.id == id)
    }

    /// Playlists in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Whether there are no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Copy of a playlist's tracks to hand to the playback controller
    ///
    /// `None` for unknown or empty playlists: there is nothing to play.
    pub fn tracks_for_playback(&self, id: &PlaylistId) -> Option<Vec<Track>> {
        self.get(id)
            .filter(|playlist| !playlist.is_empty())
            .map(|playlist| playlist.tracks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn track(id: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration: Duration::from_secs(120),
            source: format!("/music/{}.mp3", id),
            artwork: None,
            lyrics: None,
        }
    }

    #[test]
    fn create_appends_in_order() {
        let mut playlists = PlaylistCollection::new();
        let first = playlists.create("Morning");
        let second = playlists.create("Evening");

        let names: Vec<_> = playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Morning", "Evening"]);
        assert_ne!(first, second);
        assert!(playlists.get(&first).unwrap().is_empty());
    }

    #[test]
    fn remove_track_drops_every_copy() {
        let mut playlists = PlaylistCollection::new();
        let id = playlists.create("Mix");
        playlists.add_track(&id, track("a"));
        playlists.add_track(&id, track("b"));
        playlists.add_track(&id, track("a"));

        assert!(playlists.remove_track(&id, &TrackId::new("a")));

        let ids: Vec<_> = playlists
            .get(&id)
            .unwrap()
            .tracks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn unknown_ids_are_reported_not_failed() {
        let mut playlists = PlaylistCollection::new();
        let missing = PlaylistId::new("missing");

        assert!(!playlists.add_track(&missing, track("a")));
        assert!(!playlists.remove_track(&missing, &TrackId::new("a")));
        assert!(!playlists.delete(&missing));
        assert!(playlists.tracks_for_playback(&missing).is_none());
    }

    #[test]
    fn playback_copy_is_detached() {
        let mut playlists = PlaylistCollection::new();
        let id = playlists.create("Road trip");
        assert!(playlists.tracks_for_playback(&id).is_none());

        playlists.add_track(&id, track("a"));
        let copy = playlists.tracks_for_playback(&id).unwrap();
        playlists.add_track(&id, track("b"));

        assert_eq!(copy.len(), 1);
        assert_eq!(playlists.get(&id).unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_playlist() {
        let mut playlists = PlaylistCollection::new();
        let id = playlists.create("Old");

        assert!(playlists.delete(&id));
        assert!(playlists.is_empty());
        assert!(!playlists.delete(&id));
    }
}
