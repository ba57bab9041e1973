//! Player event log
//!
//! Subscribes to the session's events and reports the ones an operator cares
//! about through tracing.

use melody_playback::{PlayerEvent, PlayerHandle};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Log player events until the session's event channel closes
pub fn spawn_event_log(player: &PlayerHandle) -> JoinHandle<()> {
    let mut events = player.subscribe();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn log_event(event: &PlayerEvent) {
    match event {
        PlayerEvent::TrackChanged { track_id, .. } => {
            info!(track = %track_id, "Now playing");
        }
        PlayerEvent::StateChanged { state } => debug!(?state, "Playback state changed"),
        PlayerEvent::SleepTimerChanged { minutes: Some(minutes) } => {
            info!(minutes, "Sleep timer armed");
        }
        PlayerEvent::SleepTimerChanged { minutes: None } => info!("Sleep timer cleared"),
        PlayerEvent::TrackListChanged { length } => debug!(length, "Track list changed"),
        PlayerEvent::Error { message } => warn!("Playback error: {}", message),
        PlayerEvent::PositionUpdate { .. }
        | PlayerEvent::VolumeChanged { .. }
        | PlayerEvent::SequencingChanged { .. } => trace!(?event, "Player event"),
    }
}
