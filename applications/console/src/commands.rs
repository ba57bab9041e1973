//! Operator commands
//!
//! One command per input line. Input is validated here, before anything
//! reaches the player: empty playlist names, non-positive sleep minutes and
//! out-of-range volumes or gains never become commands.

use melody_library::{EqualizerPreset, BAND_COUNT, MAX_GAIN, MIN_GAIN};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Playback:
  play [n]                 play track n of the track list (or resume)
  pause | toggle           pause, or toggle play/pause
  next | prev              skip forward or back
  seek <seconds>           jump within the current track
  volume <0-100>           set volume
  shuffle | repeat         toggle shuffle, cycle repeat off/all/one
  sleep <minutes|off>      pause after a number of minutes
Library:
  upload <paths...>        add audio files to the track list
  list                     show the track list
  search <query>           filter the track list by title, artist or album
  status [json]            show what is playing
Playlists:
  playlists                list playlists
  playlist new <name>      create a playlist
  playlist add <p> <n>     add track n of the track list to playlist p
  playlist remove <p> <n>  remove the n-th track of playlist p
  playlist delete <p>      delete playlist p
  playlist play <p>        play playlist p from the start
  playlist show <p>        show the tracks of playlist p
Equalizer:
  eq                       show band gains
  eq preset <name>         apply Rock, Pop, Jazz, Classical or Electronic
  eq set <band> <gain>     set band 1-10 to a gain from -10 to 10
  eq reset                 flatten every band
  help | quit";

/// Rejected input, shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {what}: {value}")]
    Invalid { what: &'static str, value: String },

    #[error("Unexpected argument: {0}")]
    Unexpected(String),
}

/// Playlist subcommands; indices are 1-based as shown to the operator
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistCommand {
    New(String),
    Add { playlist: usize, track: usize },
    Remove { playlist: usize, track: usize },
    Delete(usize),
    Play(usize),
    Show(usize),
}

/// Equalizer subcommands
#[derive(Debug, Clone, PartialEq)]
pub enum EqCommand {
    Show,
    Preset(EqualizerPreset),
    /// Zero-based band
    Set { band: usize, gain: i8 },
    Reset,
}

/// A validated operator command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play track n (1-based) or resume
    Play(Option<usize>),
    Pause,
    Toggle,
    Next,
    Previous,
    Seek(f64),
    /// Volume as 0.0 - 1.0
    Volume(f32),
    Shuffle,
    Repeat,
    /// `None` cancels
    Sleep(Option<u32>),
    Upload(Vec<PathBuf>),
    List,
    Search(String),
    Status { json: bool },
    Playlists,
    Playlist(PlaylistCommand),
    Eq(EqCommand),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::MissingArgument("command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "play" => Command::Play(optional_index(&args, "track number")?),
            "pause" => no_args(&args, Command::Pause)?,
            "toggle" => no_args(&args, Command::Toggle)?,
            "next" => no_args(&args, Command::Next)?,
            "prev" | "previous" => no_args(&args, Command::Previous)?,
            "seek" => Command::Seek(parse_seconds(single(&args, "seconds")?)?),
            "volume" | "vol" => Command::Volume(parse_volume(single(&args, "volume")?)?),
            "shuffle" => no_args(&args, Command::Shuffle)?,
            "repeat" => no_args(&args, Command::Repeat)?,
            "sleep" => Command::Sleep(parse_sleep(single(&args, "minutes")?)?),
            "upload" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument("paths"));
                }
                Command::Upload(args.iter().map(PathBuf::from).collect())
            }
            "list" | "ls" => no_args(&args, Command::List)?,
            "search" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArgument("query"));
                }
                Command::Search(args.join(" "))
            }
            "status" => match args.as_slice() {
                [] => Command::Status { json: false },
                ["json"] => Command::Status { json: true },
                [other, ..] => return Err(CommandError::Unexpected((*other).to_string())),
            },
            "playlists" => no_args(&args, Command::Playlists)?,
            "playlist" | "pl" => Command::Playlist(parse_playlist(&args)?),
            "eq" => Command::Eq(parse_eq(&args)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn no_args(args: &[&str], command: Command) -> Result<Command, CommandError> {
    match args.first() {
        None => Ok(command),
        Some(extra) => Err(CommandError::Unexpected((*extra).to_string())),
    }
}

fn single<'a>(args: &[&'a str], what: &'static str) -> Result<&'a str, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument(what)),
        [value] => Ok(*value),
        [_, extra, ..] => Err(CommandError::Unexpected((*extra).to_string())),
    }
}

fn invalid(what: &'static str, value: &str) -> CommandError {
    CommandError::Invalid {
        what,
        value: value.to_string(),
    }
}

/// 1-based index, at least 1
fn parse_index(value: &str, what: &'static str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(invalid(what, value)),
    }
}

fn optional_index(args: &[&str], what: &'static str) -> Result<Option<usize>, CommandError> {
    match args {
        [] => Ok(None),
        [value] => parse_index(value, what).map(Some),
        [_, extra, ..] => Err(CommandError::Unexpected((*extra).to_string())),
    }
}

fn parse_seconds(value: &str) -> Result<f64, CommandError> {
    match value.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(invalid("position", value)),
    }
}

fn parse_volume(value: &str) -> Result<f32, CommandError> {
    match value.trim_end_matches('%').parse::<u8>() {
        Ok(percent) if percent <= 100 => Ok(f32::from(percent) / 100.0),
        _ => Err(invalid("volume", value)),
    }
}

fn parse_sleep(value: &str) -> Result<Option<u32>, CommandError> {
    if value.eq_ignore_ascii_case("off") {
        return Ok(None);
    }

    match value.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(Some(minutes)),
        _ => Err(invalid("sleep minutes", value)),
    }
}

fn parse_playlist(args: &[&str]) -> Result<PlaylistCommand, CommandError> {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::MissingArgument("playlist action"));
    };

    let command = match action.to_ascii_lowercase().as_str() {
        "new" | "create" => {
            let name = rest.join(" ");
            if name.trim().is_empty() {
                return Err(CommandError::MissingArgument("playlist name"));
            }
            PlaylistCommand::New(name)
        }
        "add" => {
            let (playlist, track) = index_pair(rest)?;
            PlaylistCommand::Add { playlist, track }
        }
        "remove" | "rm" => {
            let (playlist, track) = index_pair(rest)?;
            PlaylistCommand::Remove { playlist, track }
        }
        "delete" | "del" => PlaylistCommand::Delete(playlist_index(rest)?),
        "play" => PlaylistCommand::Play(playlist_index(rest)?),
        "show" => PlaylistCommand::Show(playlist_index(rest)?),
        other => return Err(CommandError::Unknown(format!("playlist {}", other))),
    };

    Ok(command)
}

fn playlist_index(args: &[&str]) -> Result<usize, CommandError> {
    parse_index(single(args, "playlist number")?, "playlist number")
}

fn index_pair(args: &[&str]) -> Result<(usize, usize), CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument("playlist number")),
        [_] => Err(CommandError::MissingArgument("track number")),
        [playlist, track] => Ok((
            parse_index(playlist, "playlist number")?,
            parse_index(track, "track number")?,
        )),
        [_, _, extra, ..] => Err(CommandError::Unexpected((*extra).to_string())),
    }
}

fn parse_eq(args: &[&str]) -> Result<EqCommand, CommandError> {
    let Some((action, rest)) = args.split_first() else {
        return Ok(EqCommand::Show);
    };

    let command = match action.to_ascii_lowercase().as_str() {
        "preset" => {
            let name = single(rest, "preset name")?;
            let preset = name
                .parse::<EqualizerPreset>()
                .map_err(|_| invalid("preset", name))?;
            EqCommand::Preset(preset)
        }
        "set" => match rest {
            [band, gain] => EqCommand::Set {
                band: parse_band(band)?,
                gain: parse_gain(gain)?,
            },
            [_, _, extra, ..] => return Err(CommandError::Unexpected((*extra).to_string())),
            _ => return Err(CommandError::MissingArgument("band and gain")),
        },
        "reset" => {
            if let Some(extra) = rest.first() {
                return Err(CommandError::Unexpected((*extra).to_string()));
            }
            EqCommand::Reset
        }
        other => return Err(CommandError::Unknown(format!("eq {}", other))),
    };

    Ok(command)
}

fn parse_band(value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(band) if (1..=BAND_COUNT).contains(&band) => Ok(band - 1),
        _ => Err(invalid("band", value)),
    }
}

fn parse_gain(value: &str) -> Result<i8, CommandError> {
    match value.trim_start_matches('+').parse::<i8>() {
        Ok(gain) if (MIN_GAIN..=MAX_GAIN).contains(&gain) => Ok(gain),
        _ => Err(invalid("gain", value)),
    }
}
