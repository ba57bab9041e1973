//! Configuration loading tests

use melody_console::{ConsoleConfig, ConsoleError};
use melody_playback::RepeatMode;
use std::fs;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("melody.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn loads_every_section_from_file() {
    let (_dir, path) = write_config(
        r#"
[playback]
volume = 0.5
repeat = "all"
shuffle_seed = 9

[media]
tick_interval_ms = 250
track_seconds = 30.0
accepted_extensions = ["mp3", "ogg"]

[library]
demo_tracks = true
"#,
    );

    let config = ConsoleConfig::load(Some(path.as_path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.playback.volume, 0.5);
    assert_eq!(config.playback.repeat, RepeatMode::All);
    assert_eq!(config.playback.shuffle_seed, Some(9));
    assert!(!config.playback.shuffle);
    assert_eq!(config.media.tick_interval_ms, 250);
    assert_eq!(config.media.track_seconds, 30.0);
    assert_eq!(config.media.accepted_extensions, vec!["mp3", "ogg"]);
    assert!(config.library.demo_tracks);
}

#[test]
fn missing_sections_use_defaults() {
    let (_dir, path) = write_config("[playback]\nshuffle = true\n");

    let config = ConsoleConfig::load(Some(path.as_path())).unwrap();

    assert!(config.playback.shuffle);
    assert_eq!(config.playback.volume, 1.0);
    assert_eq!(config.media, ConsoleConfig::default().media);
    assert!(!config.library.demo_tracks);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = ConsoleConfig::load(Some(path.as_path()));

    assert!(matches!(result, Err(ConsoleError::Config(_))));
}

#[test]
fn invalid_values_fail_validation() {
    let (_dir, path) = write_config("[media]\ntick_interval_ms = 0\n");
    let config = ConsoleConfig::load(Some(path.as_path())).unwrap();
    assert!(config.validate().is_err());

    let (_dir, path) = write_config("[playback]\nvolume = 3.0\n");
    let config = ConsoleConfig::load(Some(path.as_path())).unwrap();
    assert!(config.validate().is_err());
}
