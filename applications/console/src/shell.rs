//! Operator shell
//!
//! Reads commands line by line and carries them out against the player
//! session, the playlist collection and the equalizer settings. Playback
//! start failures are reported and the shell carries on; a closed session
//! ends it.

use crate::commands::{Command, EqCommand, PlaylistCommand, HELP};
use crate::error::Result;
use melody_core::{format_duration, format_seconds, Playlist, Track};
use melody_library::{search_tracks, EqualizerSettings, PlaylistCollection};
use melody_playback::{
    PlaybackState, PlayerHandle, PlayerSnapshot, SessionError, SessionResult, UploadedFile,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Whether the shell should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    player: PlayerHandle,
    playlists: PlaylistCollection,
    equalizer: EqualizerSettings,
}

impl Shell {
    pub fn new(player: PlayerHandle) -> Self {
        Self {
            player,
            playlists: PlaylistCollection::new(),
            equalizer: EqualizerSettings::new(),
        }
    }

    pub fn playlists(&self) -> &PlaylistCollection {
        &self.playlists
    }

    pub fn equalizer(&self) -> &EqualizerSettings {
        &self.equalizer
    }

    /// Execute commands from `input` until it ends or `quit` is read
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    debug!(?command, "Executing command");
                    if self.execute(command, out).await? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{}", err)?,
            }
            out.flush()?;
        }

        Ok(())
    }

    /// Carry out one command, writing its output to `out`
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Play(None) => {
                let result = self.player.play(None).await;
                report(result, out)?;
            }
            Command::Play(Some(number)) => {
                let snapshot = self.player.snapshot().await?;
                match nth(&snapshot.track_list, number) {
                    Some(track) => {
                        let result = self.player.play(Some(track.clone())).await;
                        report(result, out)?;
                    }
                    None => writeln!(out, "No track {} in the track list", number)?,
                }
            }
            Command::Pause => self.player.pause().await?,
            Command::Toggle => {
                let result = self.player.toggle_play_pause().await;
                report(result, out)?;
            }
            Command::Next => {
                let result = self.player.next_song().await;
                report(result, out)?;
            }
            Command::Previous => {
                let result = self.player.previous_song().await;
                report(result, out)?;
            }
            Command::Seek(seconds) => self.player.seek_to(seconds).await?,
            Command::Volume(volume) => self.player.set_volume(volume).await?,
            Command::Shuffle => {
                self.player.toggle_shuffle().await?;
                let snapshot = self.player.snapshot().await?;
                writeln!(out, "Shuffle {}", on_off(snapshot.sequencing.shuffle))?;
            }
            Command::Repeat => {
                self.player.toggle_repeat().await?;
                let snapshot = self.player.snapshot().await?;
                writeln!(out, "Repeat {}", snapshot.sequencing.repeat.as_str())?;
            }
            Command::Sleep(minutes) => {
                self.player.set_sleep_timer(minutes).await?;
                match minutes {
                    Some(minutes) => writeln!(out, "Sleeping in {} min", minutes)?,
                    None => writeln!(out, "Sleep timer off")?,
                }
            }
            Command::Upload(paths) => self.upload(&paths, out).await?,
            Command::List => {
                let snapshot = self.player.snapshot().await?;
                if snapshot.track_list.is_empty() {
                    writeln!(out, "Track list is empty")?;
                }
                for (index, track) in snapshot.track_list.iter().enumerate() {
                    let marker = if snapshot.cursor == Some(index) { '>' } else { ' ' };
                    writeln!(out, "{} {:>3}. {}", marker, index + 1, track_line(track))?;
                }
            }
            Command::Search(query) => {
                let snapshot = self.player.snapshot().await?;
                let found = search_tracks(&snapshot.track_list, &query);
                if found.is_empty() {
                    writeln!(out, "No songs found")?;
                }
                for track in found {
                    writeln!(out, "  {}", track_line(track))?;
                }
            }
            Command::Status { json } => {
                let snapshot = self.player.snapshot().await?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
                } else {
                    writeln!(out, "{}", status_line(&snapshot))?;
                }
            }
            Command::Playlists => {
                if self.playlists.is_empty() {
                    writeln!(out, "No playlists")?;
                }
                for (index, playlist) in self.playlists.iter().enumerate() {
                    writeln!(
                        out,
                        "{:>3}. {} ({} songs, created {})",
                        index + 1,
                        playlist.name,
                        playlist.len(),
                        playlist.created_at.format("%Y-%m-%d %H:%M")
                    )?;
                }
            }
            Command::Playlist(command) => self.playlist(command, out).await?,
            Command::Eq(command) => self.eq(command, out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn upload<W: Write>(&mut self, paths: &[PathBuf], out: &mut W) -> Result<()> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            if !path.is_file() {
                writeln!(out, "Not a file: {}", path.display())?;
                continue;
            }
            files.push(uploaded_file(path));
        }

        let offered = files.len();
        let added = self.player.ingest_uploads(files).await?;
        writeln!(
            out,
            "Added {} track(s), skipped {} non-audio file(s)",
            added,
            offered - added
        )?;
        Ok(())
    }

    async fn playlist<W: Write>(&mut self, command: PlaylistCommand, out: &mut W) -> Result<()> {
        match command {
            PlaylistCommand::New(name) => {
                let name = name.trim().to_string();
                self.playlists.create(name.clone());
                writeln!(out, "Created playlist {}", name)?;
            }
            PlaylistCommand::Add { playlist, track } => {
                let snapshot = self.player.snapshot().await?;
                let Some(id) = self.playlist_at(playlist).map(|p| p.id.clone()) else {
                    return no_playlist(playlist, out);
                };
                let Some(track) = nth(&snapshot.track_list, track).cloned() else {
                    writeln!(out, "No track {} in the track list", track)?;
                    return Ok(());
                };

                let title = track.title.clone();
                self.playlists.add_track(&id, track);
                writeln!(out, "Added {}", title)?;
            }
            PlaylistCommand::Remove { playlist, track } => {
                let Some(found) = self.playlist_at(playlist) else {
                    return no_playlist(playlist, out);
                };
                let Some(entry) = nth(&found.tracks, track) else {
                    writeln!(out, "No track {} in {}", track, found.name)?;
                    return Ok(());
                };

                let id = found.id.clone();
                let (track_id, title) = (entry.id.clone(), entry.title.clone());
                self.playlists.remove_track(&id, &track_id);
                writeln!(out, "Removed {}", title)?;
            }
            PlaylistCommand::Delete(playlist) => {
                let Some(found) = self.playlist_at(playlist) else {
                    return no_playlist(playlist, out);
                };

                let (id, name) = (found.id.clone(), found.name.clone());
                self.playlists.delete(&id);
                writeln!(out, "Deleted playlist {}", name)?;
            }
            PlaylistCommand::Play(playlist) => {
                let Some(id) = self.playlist_at(playlist).map(|p| p.id.clone()) else {
                    return no_playlist(playlist, out);
                };
                let Some(tracks) = self.playlists.tracks_for_playback(&id) else {
                    writeln!(out, "Playlist is empty")?;
                    return Ok(());
                };

                let first = tracks.first().cloned();
                self.player.set_current_playlist(tracks, 0).await?;
                let result = self.player.play(first).await;
                report(result, out)?;
            }
            PlaylistCommand::Show(playlist) => {
                let Some(found) = self.playlist_at(playlist) else {
                    return no_playlist(playlist, out);
                };

                writeln!(out, "{}", found.name)?;
                if found.is_empty() {
                    writeln!(out, "  No songs in this playlist")?;
                }
                for (index, track) in found.tracks.iter().enumerate() {
                    writeln!(out, "  {:>3}. {}", index + 1, track_line(track))?;
                }
            }
        }

        Ok(())
    }

    fn eq<W: Write>(&mut self, command: EqCommand, out: &mut W) -> Result<()> {
        match command {
            EqCommand::Show => {}
            EqCommand::Preset(preset) => {
                self.equalizer.apply_preset(preset);
                writeln!(out, "Applied {} preset", preset)?;
            }
            EqCommand::Set { band, gain } => {
                self.equalizer.set_band(band, gain);
            }
            EqCommand::Reset => {
                self.equalizer.reset();
                writeln!(out, "Equalizer reset")?;
            }
        }

        let bands: Vec<String> = self
            .equalizer
            .bands()
            .map(|(label, gain)| format!("{}:{:+}", label, gain))
            .collect();
        writeln!(out, "{}", bands.join(" "))?;
        Ok(())
    }

    fn playlist_at(&self, number: usize) -> Option<&Playlist> {
        number
            .checked_sub(1)
            .and_then(|index| self.playlists.iter().nth(index))
    }
}

/// Print a playback failure and keep going; a closed session is fatal
fn report<W: Write>(result: SessionResult<()>, out: &mut W) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(SessionError::Playback(err)) => {
            writeln!(out, "{}", err)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Item at a 1-based position
fn nth<T>(items: &[T], number: usize) -> Option<&T> {
    number.checked_sub(1).and_then(|index| items.get(index))
}

fn no_playlist<W: Write>(number: usize, out: &mut W) -> Result<()> {
    writeln!(out, "No playlist {}", number)?;
    Ok(())
}

fn uploaded_file(path: &Path) -> UploadedFile {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    UploadedFile {
        name,
        content_type: mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
        locator: path.display().to_string(),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn track_line(track: &Track) -> String {
    let length = if track.has_duration() {
        format_duration(track.duration)
    } else {
        "--:--".to_string()
    };
    format!("{} - {} [{}] {}", track.title, track.artist, track.album, length)
}

fn status_line(snapshot: &PlayerSnapshot) -> String {
    let icon = match snapshot.state {
        PlaybackState::Empty => return "Nothing selected".to_string(),
        PlaybackState::Paused => "||",
        PlaybackState::Playing => ">",
    };

    let title = snapshot
        .current_track
        .as_ref()
        .map(|track| format!("{} - {}", track.title, track.artist))
        .unwrap_or_default();

    let mut line = format!(
        "{} {}  {} / {}  vol {}%  shuffle {}  repeat {}",
        icon,
        title,
        format_seconds(snapshot.transport.elapsed_seconds),
        format_seconds(snapshot.transport.total_seconds),
        (snapshot.transport.volume * 100.0).round(),
        on_off(snapshot.sequencing.shuffle),
        snapshot.sequencing.repeat.as_str(),
    );
    if let Some(minutes) = snapshot.sleep_timer_minutes {
        line.push_str(&format!("  sleep {}m", minutes));
    }
    line
}
