//! Property-based tests for library state

use melody_core::{Track, TrackId};
use melody_library::{
    search_tracks, EqualizerPreset, EqualizerSettings, PlaylistCollection, BAND_COUNT, MAX_GAIN,
    MIN_GAIN,
};
use proptest::prelude::*;
use std::time::Duration;

fn track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Title {}", id),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        duration: Duration::from_secs(60),
        source: format!("/music/{}.mp3", id),
        artwork: None,
        lyrics: None,
    }
}

proptest! {
    /// Property: gains never leave the allowed range
    #[test]
    fn gains_stay_in_range(
        writes in prop::collection::vec((0usize..BAND_COUNT + 2, any::<i8>()), 0..40)
    ) {
        let mut eq = EqualizerSettings::new();

        for (band, gain) in writes {
            let accepted = eq.set_band(band, gain);
            prop_assert_eq!(accepted, band < BAND_COUNT);
        }

        prop_assert!(eq.gains().iter().all(|g| (MIN_GAIN..=MAX_GAIN).contains(g)));
    }

    /// Property: every preset applies exactly its own vector
    #[test]
    fn presets_apply_wholesale(
        start in prop::array::uniform10(any::<i8>()),
        index in 0usize..EqualizerPreset::ALL.len()
    ) {
        let preset = EqualizerPreset::ALL[index];
        let mut eq = EqualizerSettings::new();
        eq.set_gains(start);

        eq.apply_preset(preset);

        prop_assert_eq!(eq.gains(), preset.gains());
    }

    /// Property: removing a track id leaves no entry with that id
    #[test]
    fn remove_clears_all_copies(
        ids in prop::collection::vec("[a-c]", 0..20),
        target in "[a-c]"
    ) {
        let mut playlists = PlaylistCollection::new();
        let id = playlists.create("Mix");
        for track_id in &ids {
            playlists.add_track(&id, track(track_id));
        }

        playlists.remove_track(&id, &TrackId::new(target.clone()));

        let remaining = &playlists.get(&id).unwrap().tracks;
        prop_assert!(remaining.iter().all(|t| t.id.as_str() != target));
        prop_assert_eq!(
            remaining.len(),
            ids.iter().filter(|t| **t != target).count()
        );
    }

    /// Property: search results are a subsequence of the input
    #[test]
    fn search_preserves_order(
        ids in prop::collection::vec("[a-z]{1,4}", 0..20),
        query in "[a-z]{0,2}"
    ) {
        let tracks: Vec<_> = ids.iter().map(|id| track(id)).collect();

        let found = search_tracks(&tracks, &query);

        let positions: Vec<_> = found
            .iter()
            .map(|hit| tracks.iter().position(|t| std::ptr::eq(t, *hit)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
