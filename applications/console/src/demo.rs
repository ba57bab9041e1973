//! Demo tracks for trying the player without uploading anything

use melody_core::{Track, TrackId};
use std::time::Duration;

pub fn demo_tracks() -> Vec<Track> {
    vec![
        Track {
            id: TrackId::new("1"),
            title: "Chill Vibes".to_string(),
            artist: "Demo Artist".to_string(),
            album: "Sample Album".to_string(),
            duration: Duration::from_secs(180),
            source: "/demo/chill-vibes.mp3".to_string(),
            artwork: Some("/demo/artwork/chill-vibes.svg".to_string()),
            lyrics: Some("Sample lyrics for demonstration...".to_string()),
        },
        Track {
            id: TrackId::new("2"),
            title: "Electronic Dreams".to_string(),
            artist: "Synth Master".to_string(),
            album: "Digital Waves".to_string(),
            duration: Duration::from_secs(240),
            source: "/demo/electronic-dreams.mp3".to_string(),
            artwork: Some("/demo/artwork/electronic-dreams.svg".to_string()),
            lyrics: None,
        },
        Track {
            id: TrackId::new("3"),
            title: "Acoustic Journey".to_string(),
            artist: "Folk Singer".to_string(),
            album: "Unplugged Sessions".to_string(),
            duration: Duration::from_secs(200),
            source: "/demo/acoustic-journey.mp3".to_string(),
            artwork: Some("/demo/artwork/acoustic-journey.svg".to_string()),
            lyrics: None,
        },
    ]
}
