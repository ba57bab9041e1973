//! Simulated media element
//!
//! Stands in for a real audio output: a clock that advances while playing and
//! reports progress back to the player session, the way an audio element
//! fires its time, duration and ended callbacks.

use melody_playback::{MediaElement, MediaError, MediaSignal, PlayerHandle, SessionError};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct ClockState {
    source: Option<String>,
    supported: bool,
    playing: bool,
    position: f64,
    volume: f32,
    // Reported on the next tick after a source is assigned
    duration_pending: bool,
}

/// Shared clock behind a [`SimulatedMedia`]
///
/// The element half lives inside the player session; the clock half is
/// driven by [`spawn_clock`].
#[derive(Debug, Clone)]
pub struct MediaClock {
    state: Arc<Mutex<ClockState>>,
    track_seconds: f64,
}

impl MediaClock {
    /// Clock whose sources all last `track_seconds`
    pub fn new(track_seconds: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState::default())),
            track_seconds,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance by `elapsed` and collect the signals that produces
    pub fn tick(&self, elapsed: Duration) -> Vec<MediaSignal> {
        let mut state = self.lock();
        let mut signals = Vec::new();

        if state.duration_pending {
            state.duration_pending = false;
            signals.push(MediaSignal::DurationChange(self.track_seconds));
        }

        if !state.playing {
            return signals;
        }

        state.position = (state.position + elapsed.as_secs_f64()).min(self.track_seconds);
        signals.push(MediaSignal::TimeUpdate(state.position));

        if state.position >= self.track_seconds {
            state.playing = false;
            signals.push(MediaSignal::Ended);
        }

        signals
    }

    /// Whether the element is currently playing
    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.lock().position
    }

    /// Locator currently loaded
    pub fn source(&self) -> Option<String> {
        self.lock().source.clone()
    }

    /// Volume last pushed by the controller
    pub fn volume(&self) -> f32 {
        self.lock().volume
    }
}

/// [`MediaElement`] backed by a [`MediaClock`]
///
/// Only sources whose extension is in the accepted list can be played;
/// anything else fails to start with [`MediaError::UnsupportedFormat`].
#[derive(Debug)]
pub struct SimulatedMedia {
    clock: MediaClock,
    accepted_extensions: Vec<String>,
}

impl SimulatedMedia {
    pub fn new(clock: MediaClock, accepted_extensions: &[String]) -> Self {
        Self {
            clock,
            accepted_extensions: accepted_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn is_supported(&self, locator: &str) -> bool {
        Path::new(locator)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| self.accepted_extensions.contains(&ext))
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, locator: &str) {
        let supported = self.is_supported(locator);
        let mut state = self.clock.lock();

        state.source = Some(locator.to_string());
        state.supported = supported;
        state.playing = false;
        state.position = 0.0;
        state.duration_pending = supported;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut state = self.clock.lock();

        let Some(source) = state.source.as_ref() else {
            return Err(MediaError::NoSource);
        };
        if !state.supported {
            return Err(MediaError::UnsupportedFormat(source.clone()));
        }

        if state.position >= self.clock.track_seconds {
            state.position = 0.0;
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.clock.lock().playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        let track_seconds = self.clock.track_seconds;
        self.clock.lock().position = seconds.clamp(0.0, track_seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.clock.lock().volume = volume;
    }
}

/// Drive `clock` every `interval`, forwarding its signals to `player`
///
/// Stops once the session has closed.
pub fn spawn_clock(clock: MediaClock, player: PlayerHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            for signal in clock.tick(interval) {
                trace!(?signal, "Media signal");
                if let Err(SessionError::Closed) = player.media_signal(signal).await {
                    debug!("Player session closed, stopping media clock");
                    return;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> (SimulatedMedia, MediaClock) {
        let clock = MediaClock::new(10.0);
        let media = SimulatedMedia::new(clock.clone(), &["mp3".to_string(), ".FLAC".to_string()]);
        (media, clock)
    }

    #[test]
    fn play_without_source_fails() {
        let (mut media, _) = media();
        assert_eq!(media.play(), Err(MediaError::NoSource));
    }

    #[test]
    fn unsupported_extension_fails_to_start() {
        let (mut media, clock) = media();
        media.set_source("/music/track.xyz");

        assert!(matches!(media.play(), Err(MediaError::UnsupportedFormat(_))));
        assert!(!clock.is_playing());
        assert!(clock.tick(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn extensions_match_case_insensitively() {
        let (mut media, clock) = media();
        media.set_source("/music/Track.Flac");

        media.play().unwrap();
        assert!(clock.is_playing());
    }

    #[test]
    fn tick_reports_duration_then_progress() {
        let (mut media, clock) = media();
        media.set_source("/music/a.mp3");
        media.play().unwrap();

        let signals = clock.tick(Duration::from_secs(2));
        assert_eq!(
            signals,
            vec![MediaSignal::DurationChange(10.0), MediaSignal::TimeUpdate(2.0)]
        );

        let signals = clock.tick(Duration::from_secs(2));
        assert_eq!(signals, vec![MediaSignal::TimeUpdate(4.0)]);
    }

    #[test]
    fn reaching_the_end_reports_ended_once() {
        let (mut media, clock) = media();
        media.set_source("/music/a.mp3");
        media.play().unwrap();
        media.set_current_time(9.5);

        let signals = clock.tick(Duration::from_secs(1));
        assert_eq!(signals.last(), Some(&MediaSignal::Ended));
        assert!(!clock.is_playing());
        assert!(clock.tick(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn play_after_end_restarts() {
        let (mut media, clock) = media();
        media.set_source("/music/a.mp3");
        media.play().unwrap();
        media.set_current_time(10.0);
        clock.tick(Duration::from_secs(1));

        media.play().unwrap();
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn seek_is_bounded_by_source_length() {
        let (mut media, clock) = media();
        media.set_source("/music/a.mp3");

        media.set_current_time(25.0);
        assert_eq!(clock.position(), 10.0);

        media.set_current_time(-3.0);
        assert_eq!(clock.position(), 0.0);
    }
}
