//! Upload ingestion
//!
//! Turns user-selected files into tracks. Only files whose declared content
//! type is audio are kept; no metadata is read from the files themselves.

use melody_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Artist assigned to every uploaded track
pub const UPLOAD_ARTIST: &str = "Unknown Artist";

/// Album assigned to every uploaded track
pub const UPLOAD_ALBUM: &str = "Uploaded Music";

/// A file offered for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name as selected by the user
    pub name: String,

    /// Declared MIME type
    pub content_type: String,

    /// Locator the media element can load the file from
    pub locator: String,
}

impl UploadedFile {
    /// Whether the declared content type is audio
    pub fn is_audio(&self) -> bool {
        self.content_type.starts_with("audio/")
    }
}

/// Title for an uploaded file: its name without the last extension
///
/// `"song.mp3"` becomes `"song"`, `"live.set.flac"` becomes `"live.set"`;
/// names without an extension (or ending in a bare dot) are kept whole.
pub fn title_from_file_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// Convert uploads into tracks, in upload order
///
/// Ids are `uploaded-<timestamp_millis>-<position>` where position counts
/// every offered file, skipped ones included.
pub fn tracks_from_uploads(files: &[UploadedFile], timestamp_millis: i64) -> Vec<Track> {
    files
        .iter()
        .enumerate()
        .filter(|(_, file)| file.is_audio())
        .map(|(position, file)| Track {
            id: TrackId::new(format!("uploaded-{}-{}", timestamp_millis, position)),
            title: title_from_file_name(&file.name).to_string(),
            artist: UPLOAD_ARTIST.to_string(),
            album: UPLOAD_ALBUM.to_string(),
            duration: Duration::ZERO,
            source: file.locator.clone(),
            artwork: None,
            lyrics: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content_type: content_type.to_string(),
            locator: format!("/uploads/{}", name),
        }
    }

    #[test]
    fn strips_only_last_extension() {
        assert_eq!(title_from_file_name("song.mp3"), "song");
        assert_eq!(title_from_file_name("live.set.flac"), "live.set");
        assert_eq!(title_from_file_name("README"), "README");
        assert_eq!(title_from_file_name("trailing."), "trailing.");
        assert_eq!(title_from_file_name(".hidden"), "");
    }

    #[test]
    fn skips_non_audio_and_keeps_order() {
        let files = vec![
            file("first.mp3", "audio/mpeg"),
            file("cover.png", "image/png"),
            file("second.flac", "audio/flac"),
        ];

        let tracks = tracks_from_uploads(&files, 1_700_000_000_000);

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "first");
        assert_eq!(tracks[1].title, "second");
        assert_eq!(tracks[0].id.as_str(), "uploaded-1700000000000-0");
        assert_eq!(tracks[1].id.as_str(), "uploaded-1700000000000-2");
        assert_eq!(tracks[1].source, "/uploads/second.flac");
    }

    #[test]
    fn uploads_get_placeholder_metadata() {
        let tracks = tracks_from_uploads(&[file("demo.ogg", "audio/ogg")], 5);
        let track = &tracks[0];

        assert_eq!(track.artist, UPLOAD_ARTIST);
        assert_eq!(track.album, UPLOAD_ALBUM);
        assert_eq!(track.duration, Duration::ZERO);
        assert!(track.artwork.is_none());
        assert!(track.lyrics.is_none());
    }
}
