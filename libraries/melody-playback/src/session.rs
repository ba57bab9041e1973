//! Player session
//!
//! Runs a [`PlaybackController`] on a tokio task and hands out cloneable
//! [`PlayerHandle`]s. Commands are processed one at a time, each to
//! completion, so controller logic never interleaves. The session also
//! schedules the sleep timer: arming spawns a delayed task that posts the
//! expiry back into the command queue, and re-arming aborts that task.

use crate::{
    controller::PlaybackController,
    error::{Result, SessionError, SessionResult},
    events::PlayerEvent,
    media::MediaSignal,
    sleep_timer::{delay_for, TimerToken},
    types::PlayerSnapshot,
    upload::UploadedFile,
};
use melody_core::Track;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Pending commands before senders wait
const COMMAND_CAPACITY: usize = 64;

/// Events buffered per subscriber before it starts lagging
const EVENT_CAPACITY: usize = 256;

/// Commands sent to the session task
#[derive(Debug)]
enum SessionCommand {
    Play {
        track: Option<Track>,
        reply: oneshot::Sender<Result<()>>,
    },
    Pause,
    TogglePlayPause {
        reply: oneshot::Sender<Result<()>>,
    },
    Next {
        reply: oneshot::Sender<Result<()>>,
    },
    Previous {
        reply: oneshot::Sender<Result<()>>,
    },
    Seek(f64),
    SetVolume(f32),
    ToggleShuffle,
    ToggleRepeat,
    SetCurrentPlaylist {
        tracks: Vec<Track>,
        index: usize,
    },
    AppendTracks(Vec<Track>),
    IngestUploads {
        files: Vec<UploadedFile>,
        reply: oneshot::Sender<usize>,
    },
    SetSleepTimer(Option<u32>),
    SleepTimerFired(TimerToken),
    Media(MediaSignal),
    Snapshot(oneshot::Sender<PlayerSnapshot>),
    Shutdown,
}

/// Owner of the controller while the session runs
pub struct PlayerSession {
    controller: PlaybackController,
    commands: mpsc::Receiver<SessionCommand>,
    // Weak so pending timers do not keep the session alive
    loopback: mpsc::WeakSender<SessionCommand>,
    events: broadcast::Sender<PlayerEvent>,
    sleep_task: Option<JoinHandle<()>>,
}

impl PlayerSession {
    /// Start a session for `controller` on the current tokio runtime
    ///
    /// The session ends when [`PlayerHandle::shutdown`] is called or every
    /// handle is dropped; the join handle then yields the controller back.
    pub fn spawn(controller: PlaybackController) -> (PlayerHandle, JoinHandle<PlaybackController>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let session = Self {
            controller,
            commands: command_rx,
            loopback: command_tx.downgrade(),
            events: event_tx.clone(),
            sleep_task: None,
        };

        let handle = PlayerHandle {
            commands: command_tx,
            events: event_tx,
        };

        (handle, tokio::spawn(session.run()))
    }

    async fn run(mut self) -> PlaybackController {
        debug!("Player session started");

        while let Some(command) = self.commands.recv().await {
            if matches!(command, SessionCommand::Shutdown) {
                break;
            }
            self.handle(command);
            self.publish_events();
        }

        self.cancel_sleep_task();
        debug!("Player session stopped");
        self.controller
    }

    fn handle(&mut self, command: SessionCommand) {
        let controller = &mut self.controller;

        match command {
            SessionCommand::Play { track, reply } => {
                reply.send(controller.play(track)).ok();
            }
            SessionCommand::Pause => controller.pause(),
            SessionCommand::TogglePlayPause { reply } => {
                reply.send(controller.toggle_play_pause()).ok();
            }
            SessionCommand::Next { reply } => {
                reply.send(controller.next_song()).ok();
            }
            SessionCommand::Previous { reply } => {
                reply.send(controller.previous_song()).ok();
            }
            SessionCommand::Seek(seconds) => controller.seek_to(seconds),
            SessionCommand::SetVolume(volume) => controller.set_volume(volume),
            SessionCommand::ToggleShuffle => controller.toggle_shuffle(),
            SessionCommand::ToggleRepeat => controller.toggle_repeat(),
            SessionCommand::SetCurrentPlaylist { tracks, index } => {
                controller.set_current_playlist(tracks, index);
            }
            SessionCommand::AppendTracks(tracks) => controller.append_tracks(tracks),
            SessionCommand::IngestUploads { files, reply } => {
                reply.send(controller.ingest_uploads(&files)).ok();
            }
            SessionCommand::SetSleepTimer(minutes) => self.schedule_sleep_timer(minutes),
            SessionCommand::SleepTimerFired(token) => {
                if controller.sleep_timer_expired(token) {
                    self.sleep_task = None;
                }
            }
            SessionCommand::Media(signal) => {
                // Failures are already queued as error events
                controller.handle_media_signal(signal).ok();
            }
            SessionCommand::Snapshot(reply) => {
                reply.send(controller.snapshot()).ok();
            }
            SessionCommand::Shutdown => {}
        }
    }

    fn schedule_sleep_timer(&mut self, minutes: Option<u32>) {
        self.cancel_sleep_task();

        let Some(token) = self.controller.set_sleep_timer(minutes) else {
            return;
        };
        let Some(minutes) = minutes else {
            return;
        };

        let deadline = Instant::now() + delay_for(minutes);
        let loopback = self.loopback.clone();

        info!(minutes, "Sleep timer set");
        self.sleep_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(commands) = loopback.upgrade() {
                commands
                    .send(SessionCommand::SleepTimerFired(token))
                    .await
                    .ok();
            }
        }));
    }

    fn cancel_sleep_task(&mut self) {
        if let Some(task) = self.sleep_task.take() {
            task.abort();
        }
    }

    fn publish_events(&mut self) {
        for event in self.controller.drain_events() {
            // No subscribers is fine
            self.events.send(event).ok();
        }
    }
}

/// Handle to a running player session
///
/// This is the context passed to every view. All methods fail with
/// [`SessionError::Closed`] once the session has stopped.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerHandle {
    async fn send(&self, command: SessionCommand) -> SessionResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> SessionResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(command(reply_tx)).await?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Start playback, optionally switching to `track`
    pub async fn play(&self, track: Option<Track>) -> SessionResult<()> {
        self.request(|reply| SessionCommand::Play { track, reply })
            .await?
            .map_err(SessionError::from)
    }

    /// Pause playback
    pub async fn pause(&self) -> SessionResult<()> {
        self.send(SessionCommand::Pause).await
    }

    /// Toggle between playing and paused
    pub async fn toggle_play_pause(&self) -> SessionResult<()> {
        self.request(|reply| SessionCommand::TogglePlayPause { reply })
            .await?
            .map_err(SessionError::from)
    }

    /// Skip to the next track
    pub async fn next_song(&self) -> SessionResult<()> {
        self.request(|reply| SessionCommand::Next { reply })
            .await?
            .map_err(SessionError::from)
    }

    /// Go back to the previous track
    pub async fn previous_song(&self) -> SessionResult<()> {
        self.request(|reply| SessionCommand::Previous { reply })
            .await?
            .map_err(SessionError::from)
    }

    /// Seek within the current track (seconds)
    pub async fn seek_to(&self, seconds: f64) -> SessionResult<()> {
        self.send(SessionCommand::Seek(seconds)).await
    }

    /// Set volume (0.0 - 1.0, clamped by the caller)
    pub async fn set_volume(&self, volume: f32) -> SessionResult<()> {
        self.send(SessionCommand::SetVolume(volume)).await
    }

    /// Flip shuffle
    pub async fn toggle_shuffle(&self) -> SessionResult<()> {
        self.send(SessionCommand::ToggleShuffle).await
    }

    /// Cycle repeat mode
    pub async fn toggle_repeat(&self) -> SessionResult<()> {
        self.send(SessionCommand::ToggleRepeat).await
    }

    /// Replace the track list and select `tracks[index]`
    pub async fn set_current_playlist(
        &self,
        tracks: Vec<Track>,
        index: usize,
    ) -> SessionResult<()> {
        self.send(SessionCommand::SetCurrentPlaylist { tracks, index }).await
    }

    /// Append tracks to the track list
    pub async fn append_tracks(&self, tracks: Vec<Track>) -> SessionResult<()> {
        self.send(SessionCommand::AppendTracks(tracks)).await
    }

    /// Ingest uploaded files; returns how many became tracks
    pub async fn ingest_uploads(&self, files: Vec<UploadedFile>) -> SessionResult<usize> {
        self.request(|reply| SessionCommand::IngestUploads { files, reply }).await
    }

    /// Arm (`Some(minutes)`) or cancel (`None`) the sleep timer
    pub async fn set_sleep_timer(&self, minutes: Option<u32>) -> SessionResult<()> {
        self.send(SessionCommand::SetSleepTimer(minutes)).await
    }

    /// Forward a progress callback from the media element
    pub async fn media_signal(&self, signal: MediaSignal) -> SessionResult<()> {
        self.send(SessionCommand::Media(signal)).await
    }

    /// Current controller state
    pub async fn snapshot(&self) -> SessionResult<PlayerSnapshot> {
        self.request(SessionCommand::Snapshot).await
    }

    /// Subscribe to controller events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Stop the session after already queued commands
    pub async fn shutdown(&self) -> SessionResult<()> {
        self.send(SessionCommand::Shutdown).await
    }

    /// Whether the session has stopped
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}
