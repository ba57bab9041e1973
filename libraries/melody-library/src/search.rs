//! Library search

use melody_core::Track;

/// Tracks whose title, artist or album contains `query`, ignoring case
///
/// An empty query matches everything. Order is preserved.
pub fn search_tracks<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return tracks.iter().collect();
    }

    tracks
        .iter()
        .filter(|track| {
            [&track.title, &track.artist, &track.album]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use melody_core::TrackId;
    use std::time::Duration;

    fn track(id: &str, title: &str, artist: &str, album: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration: Duration::from_secs(200),
            source: format!("/music/{}.mp3", id),
            artwork: None,
            lyrics: None,
        }
    }

    fn library() -> Vec<Track> {
        vec![
            track("1", "Midnight Dreams", "Luna Eclipse", "Nocturnal Vibes"),
            track("2", "Electric Pulse", "Neon Nights", "Synthwave Collection"),
            track("3", "Ocean Waves", "Coastal Drift", "Nature Sounds"),
        ]
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let tracks = library();

        let by_title: Vec<_> = search_tracks(&tracks, "OCEAN")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(by_title, vec!["3"]);

        let by_artist = search_tracks(&tracks, "neon");
        assert_eq!(by_artist.len(), 1);

        let by_album = search_tracks(&tracks, "vibes");
        assert_eq!(by_album[0].id.as_str(), "1");
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(search_tracks(&library(), "").len(), 3);
    }

    #[test]
    fn query_whitespace_is_significant() {
        let tracks = library();
        assert_eq!(search_tracks(&tracks, "ocean waves").len(), 1);
        assert!(search_tracks(&tracks, " ocean").is_empty());
        assert!(search_tracks(&tracks, "   ").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search_tracks(&library(), "polka").is_empty());
    }
}
