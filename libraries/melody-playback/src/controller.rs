//! Playback controller - core orchestration
//!
//! Owns the media element, the current track list and cursor, transport
//! state, sequencing mode and the sleep timer. Every mutation of the media
//! element goes through here.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    media::{MediaElement, MediaSignal},
    sequencing::{next_index, previous_index},
    sleep_timer::{SleepTimer, TimerToken},
    types::{
        PlaybackConfig, PlaybackState, PlayerSnapshot, RepeatMode, SequencingMode, TransportState,
    },
    upload::{tracks_from_uploads, UploadedFile},
};
use chrono::Utc;
use melody_core::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Central playback management
///
/// States follow from the current track and the playing flag:
/// - `Empty` - no current track
/// - `Paused` - current track, not playing
/// - `Playing` - the media element accepted the last start request
///
/// The controller is single-threaded: each call runs to completion and
/// queues [`PlayerEvent`]s that the host collects with
/// [`drain_events`](Self::drain_events).
pub struct PlaybackController {
    media: Option<Box<dyn MediaElement>>,
    // Locator currently assigned to the media element
    loaded_source: Option<String>,

    current_track: Option<Track>,
    track_list: Vec<Track>,
    cursor: usize,

    transport: TransportState,
    sequencing: SequencingMode,
    sleep_timer: SleepTimer,

    rng: StdRng,
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller without a media element
    ///
    /// Until one is attached, `play`, `pause` and `seek_to` are no-ops.
    pub fn new(config: PlaybackConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            media: None,
            loaded_source: None,
            current_track: None,
            track_list: Vec::new(),
            cursor: 0,
            transport: TransportState {
                volume: config.volume,
                ..TransportState::default()
            },
            sequencing: SequencingMode {
                shuffle: config.shuffle,
                repeat: config.repeat,
            },
            sleep_timer: SleepTimer::new(),
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Create a controller driving `media`
    pub fn with_media(config: PlaybackConfig, media: Box<dyn MediaElement>) -> Self {
        let mut controller = Self::new(config);
        controller.attach_media(media);
        controller
    }

    /// Attach (or replace) the media element
    pub fn attach_media(&mut self, mut media: Box<dyn MediaElement>) {
        media.set_volume(self.transport.volume);
        self.media = Some(media);
        self.loaded_source = None;
    }

    /// Whether a media element is attached
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    // ===== Transport =====

    /// Start playback, optionally switching to `track` first
    ///
    /// A `track` different from the current one becomes current; if it is in
    /// the track list the cursor moves to its first occurrence, otherwise the
    /// cursor is left where it was. When the media element refuses to start,
    /// the playing flag keeps its previous value and the failure is returned.
    pub fn play(&mut self, track: Option<Track>) -> Result<()> {
        if self.media.is_none() {
            debug!("No media element attached, ignoring play");
            return Ok(());
        }

        if let Some(track) = track {
            if self.current_track.as_ref() != Some(&track) {
                self.select_track(track);
            }
        }

        self.load_current_source();

        let volume = self.transport.volume;
        let Some(media) = self.media.as_mut() else {
            return Ok(());
        };
        media.set_volume(volume);

        match media.play() {
            Ok(()) => {
                let before = self.state();
                self.transport.playing = true;
                self.emit_state_if_changed(before);
                Ok(())
            }
            Err(err) => {
                warn!(
                    track = self.current_track.as_ref().map(|t| t.id.as_str()),
                    "Playback failed to start: {}", err
                );
                self.emit(PlayerEvent::Error {
                    message: err.to_string(),
                });
                Err(PlaybackError::StartFailed(err))
            }
        }
    }

    /// Pause playback (no-op unless playing)
    pub fn pause(&mut self) {
        if !self.transport.playing {
            return;
        }

        let before = self.state();
        let Some(media) = self.media.as_mut() else {
            return;
        };
        media.pause();
        self.transport.playing = false;
        self.emit_state_if_changed(before);
    }

    /// Pause when playing, otherwise play the current (or first) track
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.transport.playing {
            self.pause();
            return Ok(());
        }

        if let Some(track) = self.current_track.clone() {
            self.play(Some(track))
        } else if let Some(first) = self.track_list.first().cloned() {
            self.play(Some(first))
        } else {
            Ok(())
        }
    }

    /// Advance to the next track
    ///
    /// No-op on an empty list, and at the wrap point when repeat is off and
    /// shuffle is disabled.
    pub fn next_song(&mut self) -> Result<()> {
        self.advance().map(|_| ())
    }

    /// Step back to the previous track (always wraps without shuffle)
    pub fn previous_song(&mut self) -> Result<()> {
        let Some(index) = previous_index(
            self.cursor,
            self.track_list.len(),
            self.sequencing,
            &mut self.rng,
        ) else {
            return Ok(());
        };

        self.play_index(index)
    }

    /// Move the playback position (seconds); no-op without a media element
    pub fn seek_to(&mut self, seconds: f64) {
        let Some(media) = self.media.as_mut() else {
            return;
        };

        media.set_current_time(seconds);
        self.transport.elapsed_seconds = seconds;
        self.emit_position();
    }

    /// Set output volume
    ///
    /// Callers clamp to 0.0 - 1.0; the value is stored as given.
    pub fn set_volume(&mut self, volume: f32) {
        self.transport.volume = volume;
        if let Some(media) = self.media.as_mut() {
            media.set_volume(volume);
        }
        self.emit(PlayerEvent::VolumeChanged { volume });
    }

    // ===== Sequencing =====

    /// Flip shuffle on/off
    pub fn toggle_shuffle(&mut self) {
        self.sequencing.shuffle = !self.sequencing.shuffle;
        self.emit_sequencing();
    }

    /// Cycle repeat `Off → All → One → Off`
    pub fn toggle_repeat(&mut self) {
        self.sequencing.repeat = self.sequencing.repeat.cycle();
        self.emit_sequencing();
    }

    /// Set repeat mode directly
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.sequencing.repeat != mode {
            self.sequencing.repeat = mode;
            self.emit_sequencing();
        }
    }

    // ===== Track list =====

    /// Replace the track list and cursor without starting playback
    ///
    /// For a non-empty list the current track becomes `tracks[index]`; an
    /// out-of-range index is clamped to the last track. An empty list resets
    /// the cursor to 0 and keeps the current track.
    pub fn set_current_playlist(&mut self, tracks: Vec<Track>, index: usize) {
        let before = self.state();

        let index = if tracks.is_empty() {
            0
        } else if index >= tracks.len() {
            warn!(
                index,
                len = tracks.len(),
                "Track list index out of range, using last track"
            );
            tracks.len() - 1
        } else {
            index
        };

        self.track_list = tracks;
        self.cursor = index;

        if let Some(track) = self.track_list.get(index).cloned() {
            if self.current_track.as_ref() != Some(&track) {
                let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
                self.emit(PlayerEvent::TrackChanged {
                    track_id: track.id.clone(),
                    previous_track_id,
                });
                self.loaded_source = None;
            }
            self.current_track = Some(track);
        }

        self.emit(PlayerEvent::TrackListChanged {
            length: self.track_list.len(),
        });
        self.emit_state_if_changed(before);
    }

    /// Append tracks to the end of the track list
    ///
    /// Cursor, current track and playback are untouched.
    pub fn append_tracks(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }

        self.track_list.extend(tracks);
        self.emit(PlayerEvent::TrackListChanged {
            length: self.track_list.len(),
        });
    }

    /// Convert uploaded files to tracks and append them
    ///
    /// Returns the number of tracks added; non-audio files are skipped.
    pub fn ingest_uploads(&mut self, files: &[UploadedFile]) -> usize {
        let tracks = tracks_from_uploads(files, Utc::now().timestamp_millis());
        let added = tracks.len();

        debug!(
            offered = files.len(),
            added, "Ingested uploaded files into track list"
        );
        self.append_tracks(tracks);
        added
    }

    // ===== Media callbacks =====

    /// Apply a progress callback from the media element
    ///
    /// On natural track end, repeat `One` restarts the track from zero; any
    /// other mode advances as [`next_song`](Self::next_song) does. When there
    /// is nothing to advance to, or the next track fails to start, playback is
    /// marked paused.
    pub fn handle_media_signal(&mut self, signal: MediaSignal) -> Result<()> {
        match signal {
            MediaSignal::TimeUpdate(seconds) => {
                self.transport.elapsed_seconds = seconds;
                self.emit_position();
                Ok(())
            }
            MediaSignal::DurationChange(seconds) => {
                self.transport.total_seconds = if seconds.is_finite() { seconds } else { 0.0 };
                self.emit_position();
                Ok(())
            }
            MediaSignal::Ended => self.handle_track_ended(),
        }
    }

    fn handle_track_ended(&mut self) -> Result<()> {
        if self.sequencing.repeat == RepeatMode::One {
            let Some(media) = self.media.as_mut() else {
                return Ok(());
            };

            media.set_current_time(0.0);
            let restarted = media.play();
            self.transport.elapsed_seconds = 0.0;
            self.emit_position();

            if let Err(err) = restarted {
                warn!("Failed to restart track: {}", err);
                self.emit(PlayerEvent::Error {
                    message: err.to_string(),
                });
                self.mark_stopped();
                return Err(PlaybackError::StartFailed(err));
            }
            return Ok(());
        }

        // The element has already stopped, so a failed advance is not playback
        match self.advance() {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!("Reached end of track list");
                self.mark_stopped();
                Ok(())
            }
            Err(err) => {
                self.mark_stopped();
                Err(err)
            }
        }
    }

    fn mark_stopped(&mut self) {
        let before = self.state();
        self.transport.playing = false;
        self.emit_state_if_changed(before);
    }

    // ===== Sleep timer =====

    /// Arm (`Some(minutes)`) or disarm (`None`) the sleep timer
    ///
    /// Arming replaces any pending deadline and returns the token that must
    /// be passed to [`sleep_timer_expired`](Self::sleep_timer_expired).
    /// `Some(0)` disarms.
    pub fn set_sleep_timer(&mut self, minutes: Option<u32>) -> Option<TimerToken> {
        let token = match minutes {
            Some(minutes) if minutes > 0 => {
                let token = self.sleep_timer.arm(minutes);
                debug!(minutes, token = token.value(), "Sleep timer armed");
                Some(token)
            }
            _ => {
                if let Some(token) = self.sleep_timer.disarm() {
                    debug!(token = token.value(), "Sleep timer cancelled");
                }
                None
            }
        };

        self.emit(PlayerEvent::SleepTimerChanged {
            minutes: self.sleep_timer.minutes(),
        });
        token
    }

    /// Deliver a sleep timer expiry
    ///
    /// Pauses and clears the timer when `token` is the armed one; stale
    /// tokens are ignored. Returns whether the timer fired.
    pub fn sleep_timer_expired(&mut self, token: TimerToken) -> bool {
        if !self.sleep_timer.fire(token) {
            debug!(token = token.value(), "Ignoring stale sleep timer");
            return false;
        }

        info!("Sleep timer expired, pausing playback");
        self.pause();
        self.emit(PlayerEvent::SleepTimerChanged { minutes: None });
        true
    }

    // ===== State Queries =====

    /// Derived playback state
    pub fn state(&self) -> PlaybackState {
        match (&self.current_track, self.transport.playing) {
            (None, _) => PlaybackState::Empty,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Whether the media element last confirmed playback
    pub fn is_playing(&self) -> bool {
        self.transport.playing
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Cursor into the track list, `None` when the list is empty
    pub fn cursor(&self) -> Option<usize> {
        if self.track_list.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Current track list
    pub fn track_list(&self) -> &[Track] {
        &self.track_list
    }

    /// Transport state
    pub fn transport(&self) -> TransportState {
        self.transport
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.transport.volume
    }

    /// Shuffle/repeat configuration
    pub fn sequencing(&self) -> SequencingMode {
        self.sequencing
    }

    /// Minutes the armed sleep timer was set to
    pub fn sleep_timer_minutes(&self) -> Option<u32> {
        self.sleep_timer.minutes()
    }

    /// Token of the armed sleep timer
    pub fn sleep_timer_token(&self) -> Option<TimerToken> {
        self.sleep_timer.token()
    }

    /// Copy of all observable state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state(),
            current_track: self.current_track.clone(),
            cursor: self.cursor(),
            track_list: self.track_list.clone(),
            transport: self.transport,
            sequencing: self.sequencing,
            sleep_timer_minutes: self.sleep_timer.minutes(),
            sleep_timer_token: self.sleep_timer.token(),
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    /// Resolve and play the next index; false when there was nothing to play
    fn advance(&mut self) -> Result<bool> {
        let Some(index) = next_index(
            self.cursor,
            self.track_list.len(),
            self.sequencing,
            &mut self.rng,
        ) else {
            return Ok(false);
        };

        self.play_index(index)?;
        Ok(true)
    }

    fn play_index(&mut self, index: usize) -> Result<()> {
        let Some(track) = self.track_list.get(index).cloned() else {
            return Ok(());
        };

        self.cursor = index;
        self.play(Some(track))
    }

    /// Make `track` current, moving the cursor to its first occurrence by id
    fn select_track(&mut self, track: Track) {
        if let Some(index) = self.track_list.iter().position(|t| t.id == track.id) {
            self.cursor = index;
        }

        let before = self.state();
        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        self.emit(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.current_track = Some(track);
        // A new track restarts its source even when the locator is shared
        self.loaded_source = None;
        self.emit_state_if_changed(before);
    }

    /// Assign the current track's locator to the media element if needed
    fn load_current_source(&mut self) {
        let Some(track) = self.current_track.as_ref() else {
            return;
        };
        if self.loaded_source.as_deref() == Some(track.source.as_str()) {
            return;
        }
        let Some(media) = self.media.as_mut() else {
            return;
        };

        debug!(track = %track.id, source = %track.source, "Loading source");
        media.set_source(&track.source);
        self.loaded_source = Some(track.source.clone());
        self.transport.elapsed_seconds = 0.0;
        self.transport.total_seconds = track.duration.as_secs_f64();
        self.emit_position();
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_if_changed(&mut self, before: PlaybackState) {
        let state = self.state();
        if state != before {
            debug!(?before, ?state, "Playback state changed");
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.emit(PlayerEvent::PositionUpdate {
            elapsed_seconds: self.transport.elapsed_seconds,
            total_seconds: self.transport.total_seconds,
        });
    }

    fn emit_sequencing(&mut self) {
        self.emit(PlayerEvent::SequencingChanged {
            mode: self.sequencing,
        });
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaError;
    use melody_core::TrackId;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct Calls {
        sources: Vec<String>,
        plays: usize,
        pauses: usize,
        refuse: bool,
    }

    struct RecordingMedia(Arc<Mutex<Calls>>);

    impl MediaElement for RecordingMedia {
        fn set_source(&mut self, locator: &str) {
            self.0.lock().unwrap().sources.push(locator.to_string());
        }

        fn play(&mut self) -> std::result::Result<(), MediaError> {
            let mut calls = self.0.lock().unwrap();
            calls.plays += 1;
            if calls.refuse {
                Err(MediaError::NotAllowed("no user gesture".to_string()))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.0.lock().unwrap().pauses += 1;
        }

        fn set_current_time(&mut self, _seconds: f64) {}

        fn set_volume(&mut self, _volume: f32) {}
    }

    fn track(id: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Track {}", id),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            duration: Duration::from_secs(180),
            source: format!("/music/{}.mp3", id),
            artwork: None,
            lyrics: None,
        }
    }

    fn controller() -> (PlaybackController, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let controller = PlaybackController::with_media(
            PlaybackConfig {
                shuffle_seed: Some(7),
                ..Default::default()
            },
            Box::new(RecordingMedia(calls.clone())),
        );
        (controller, calls)
    }

    #[test]
    fn selecting_a_track_loads_its_source_on_play() {
        let (mut controller, calls) = controller();
        controller.set_current_playlist(vec![track("a"), track("b")], 1);

        assert!(calls.lock().unwrap().sources.is_empty());
        controller.toggle_play_pause().unwrap();

        assert_eq!(calls.lock().unwrap().sources, vec!["/music/b.mp3"]);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn replaying_current_track_does_not_reload() {
        let (mut controller, calls) = controller();
        controller.set_current_playlist(vec![track("a")], 0);

        controller.play(None).unwrap();
        controller.pause();
        controller.play(Some(track("a"))).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.sources.len(), 1);
        assert_eq!(calls.plays, 2);
        assert_eq!(calls.pauses, 1);
    }

    #[test]
    fn refused_start_keeps_paused_state_and_reports_error() {
        let (mut controller, calls) = controller();
        controller.set_current_playlist(vec![track("a")], 0);
        controller.drain_events();
        calls.lock().unwrap().refuse = true;

        let result = controller.play(None);

        assert!(matches!(result, Err(PlaybackError::StartFailed(_))));
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert!(controller.drain_events().iter().any(PlayerEvent::is_error));
    }

    #[test]
    fn pause_from_paused_is_noop() {
        let (mut controller, calls) = controller();
        controller.pause();
        controller.set_current_playlist(vec![track("a")], 0);
        controller.pause();

        assert_eq!(calls.lock().unwrap().pauses, 0);
    }

    #[test]
    fn without_media_element_transport_calls_are_noops() {
        let mut controller = PlaybackController::default();
        controller.set_current_playlist(vec![track("a")], 0);

        controller.play(None).unwrap();
        controller.seek_to(30.0);

        assert!(!controller.is_playing());
        assert_eq!(controller.transport().elapsed_seconds, 0.0);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let (mut controller, _) = controller();
        controller.set_current_playlist(vec![track("a"), track("b")], 9);

        assert_eq!(controller.cursor(), Some(1));
        assert_eq!(controller.current_track().unwrap().id.as_str(), "b");
    }

    #[test]
    fn empty_list_keeps_current_track() {
        let (mut controller, _) = controller();
        controller.set_current_playlist(vec![track("a")], 0);
        controller.set_current_playlist(Vec::new(), 0);

        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.current_track().unwrap().id.as_str(), "a");
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn state_changes_are_emitted_once() {
        let (mut controller, _) = controller();
        controller.set_current_playlist(vec![track("a")], 0);
        controller.drain_events();

        controller.play(None).unwrap();
        controller.play(None).unwrap();

        let state_events = controller
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlayerEvent::StateChanged { .. }))
            .count();
        assert_eq!(state_events, 1);
    }

    #[test]
    fn switching_tracks_with_shared_locator_reloads() {
        let (mut controller, calls) = controller();
        let mut b = track("b");
        b.source = "/music/a.mp3".to_string();
        controller.set_current_playlist(vec![track("a"), b], 0);

        controller.play(None).unwrap();
        controller.next_song().unwrap();

        assert_eq!(calls.lock().unwrap().sources.len(), 2);
        assert_eq!(controller.cursor(), Some(1));
    }
}
