//! Shared helpers for playback integration tests

#![allow(dead_code)]

use melody_core::{Track, TrackId};
use melody_playback::{MediaElement, MediaError, PlaybackConfig, PlaybackController};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Everything the mock media element has been asked to do
#[derive(Debug, Default)]
pub struct MockState {
    pub sources: Vec<String>,
    pub playing: bool,
    pub position: f64,
    pub volume: f32,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub refuse: bool,
}

/// Media element that records calls and can be told to refuse playback
#[derive(Clone, Default)]
pub struct MockMedia {
    state: Arc<Mutex<MockState>>,
}

impl MockMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn refuse_playback(&self, refuse: bool) {
        self.state().refuse = refuse;
    }
}

impl MediaElement for MockMedia {
    fn set_source(&mut self, locator: &str) {
        let mut state = self.state();
        state.sources.push(locator.to_string());
        state.playing = false;
        state.position = 0.0;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut state = self.state();
        state.play_calls += 1;
        if state.refuse {
            return Err(MediaError::NotAllowed("autoplay blocked".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state().position = seconds;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state().volume = volume;
    }
}

pub fn track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Song {}", id),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        duration: Duration::from_secs(200),
        source: format!("/music/{}.mp3", id),
        artwork: None,
        lyrics: None,
    }
}

pub fn tracks(count: usize) -> Vec<Track> {
    (0..count).map(|i| track(&i.to_string())).collect()
}

/// Controller with a mock media element and a fixed shuffle seed
pub fn controller_with_media() -> (PlaybackController, MockMedia) {
    let media = MockMedia::new();
    let controller = PlaybackController::with_media(
        PlaybackConfig {
            shuffle_seed: Some(42),
            ..PlaybackConfig::default()
        },
        Box::new(media.clone()),
    );
    (controller, media)
}
