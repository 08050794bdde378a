//! Song records.
//!
//! A song keeps its raw chord sheet as the source of truth; the structured lines
//! and detected key are recomputed from it whenever the raw text changes.

use serde::{Deserialize, Serialize};

use crate::key::{KeyDetector, KeyStrategy, StrategyKind};
use crate::lyrics::parse_raw_content;
use crate::types::{KeyResult, StructuredLine};

/// Input for creating a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    /// Song title.
    pub title: String,
    /// Performing or writing artist.
    pub artist: String,
    /// Key chosen by the user; detected when absent or empty.
    #[serde(default)]
    pub key: Option<String>,
    /// Raw chord sheet text.
    pub raw_content: String,
}

/// Partial update of a song; only non-empty fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    /// New title.
    pub title: Option<String>,
    /// New artist.
    pub artist: Option<String>,
    /// New key; suppresses key detection for new raw content.
    pub key: Option<String>,
    /// New raw chord sheet text.
    pub raw_content: Option<String>,
}

/// A song with its parsed content and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Song title.
    pub title: String,
    /// Performing or writing artist.
    pub artist: String,
    /// Key the song is played in: user supplied, otherwise detected.
    pub key: Option<String>,
    /// Key found by the last detection run.
    pub detected_key: Option<String>,
    /// Confidence of the last detection run; only the scale strategy measures one.
    pub key_confidence: Option<u8>,
    /// Raw chord sheet text as entered.
    pub raw_content: String,
    /// Parsed chord sheet.
    pub structured_content: Vec<StructuredLine>,
}

/// Treat empty or whitespace-only strings as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Song {
    /// Create a song from user input, parsing the sheet and detecting its key.
    pub fn ingest(input: NewSong, detector: &KeyDetector) -> Self {
        let structured_content = parse_raw_content(&input.raw_content);
        let detection = detector.detect(&structured_content);
        let key = non_empty(input.key).or_else(|| detection.key.clone());

        Self {
            title: input.title,
            artist: input.artist,
            key,
            detected_key: detection.key.clone(),
            key_confidence: confidence_of(&detection, detector),
            raw_content: input.raw_content,
            structured_content,
        }
    }

    /// Apply a partial update.
    ///
    /// New raw content is re-parsed and, unless the update also sets a key,
    /// the key is re-detected.
    pub fn apply(&mut self, update: SongUpdate, detector: &KeyDetector) {
        if let Some(title) = non_empty(update.title) {
            self.title = title;
        }
        if let Some(artist) = non_empty(update.artist) {
            self.artist = artist;
        }

        let key = non_empty(update.key);
        if let Some(raw) = non_empty(update.raw_content) {
            self.structured_content = parse_raw_content(&raw);
            self.raw_content = raw;

            let detection = detector.detect(&self.structured_content);
            self.detected_key.clone_from(&detection.key);
            self.key_confidence = confidence_of(&detection, detector);
            if key.is_none() {
                self.key = detection.key;
            }
        }
        if key.is_some() {
            self.key = key;
        }
    }

    /// Key shown for the song, `C` when none is known.
    pub fn display_key(&self) -> String {
        crate::theory::format_key(self.key.as_deref().unwrap_or_default())
    }
}

/// Confidence worth storing: only the scale strategy measures one.
fn confidence_of(detection: &KeyResult, detector: &KeyDetector) -> Option<u8> {
    match detector.kind() {
        StrategyKind::Frequency => None,
        StrategyKind::Scale => detection.key.as_ref().map(|_| detection.confidence),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn new_song(key: Option<&str>, raw: &str) -> NewSong {
        NewSong {
            title: "Wonderwall".to_string(),
            artist: "Oasis".to_string(),
            key: key.map(String::from),
            raw_content: raw.to_string(),
        }
    }

    #[test]
    fn test_ingest_detects_key() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let song = Song::ingest(new_song(None, "G    C\nHello\nG    D\nWorld"), &detector);
        assert_eq!(song.key.as_deref(), Some("G"));
        assert_eq!(song.detected_key.as_deref(), Some("G"));
        assert_eq!(song.key_confidence, None);
        assert_eq!(song.structured_content.len(), 2);
    }

    #[test]
    fn test_ingest_keeps_user_key() {
        let detector = KeyDetector::new(StrategyKind::Scale);
        let song = Song::ingest(new_song(Some("A"), "G    C\nHello"), &detector);
        assert_eq!(song.key.as_deref(), Some("A"));
        assert!(song.detected_key.is_some());
        assert!(song.key_confidence.is_some());
    }

    #[test]
    fn test_empty_user_key_is_ignored() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let song = Song::ingest(new_song(Some("  "), "D  A\nHi"), &detector);
        assert_eq!(song.key.as_deref(), Some("D"));
    }

    #[test]
    fn test_scale_strategy_without_chords() {
        let detector = KeyDetector::new(StrategyKind::Scale);
        let song = Song::ingest(new_song(None, "Just words"), &detector);
        assert_eq!(song.key, None);
        assert_eq!(song.key_confidence, None);
        assert_eq!(song.display_key(), "C");
    }

    #[test]
    fn test_update_redetects_key() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let mut song = Song::ingest(new_song(None, "G  C\nHello"), &detector);
        song.apply(
            SongUpdate { raw_content: Some("D  A\nHello".to_string()), ..SongUpdate::default() },
            &detector,
        );
        assert_eq!(song.key.as_deref(), Some("D"));
        assert_eq!(song.raw_content, "D  A\nHello");
        assert_eq!(song.structured_content[0].chords()[0].symbol, "D");
    }

    #[test]
    fn test_update_with_key_overrides_detection() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let mut song = Song::ingest(new_song(None, "G  C\nHello"), &detector);
        song.apply(
            SongUpdate {
                key: Some("E".to_string()),
                raw_content: Some("D  A\nHello".to_string()),
                ..SongUpdate::default()
            },
            &detector,
        );
        assert_eq!(song.key.as_deref(), Some("E"));
        assert_eq!(song.detected_key.as_deref(), Some("D"));
    }

    #[test]
    fn test_update_ignores_empty_fields() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let mut song = Song::ingest(new_song(None, "G  C\nHello"), &detector);
        song.apply(
            SongUpdate { title: Some(String::new()), raw_content: Some(String::new()), ..SongUpdate::default() },
            &detector,
        );
        assert_eq!(song.title, "Wonderwall");
        assert_eq!(song.raw_content, "G  C\nHello");
        assert_eq!(song.key.as_deref(), Some("G"));
    }

    #[test]
    fn test_song_json_shape() {
        let detector = KeyDetector::new(StrategyKind::Frequency);
        let song = Song::ingest(new_song(None, "Em\nToday"), &detector);
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["rawContent"], "Em\nToday");
        assert_eq!(value["structuredContent"][0]["chords"][0]["chord"], "Em");
        assert_eq!(value["key"], "Em");
    }
}
