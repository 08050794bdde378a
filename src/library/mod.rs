//! Song library backed by a directory of chord sheet `.txt` files.
//!
//! Files are named `Artist - Title.txt` (or just `Title.txt`). The directory is
//! scanned lazily on first use; every file is parsed and keyed on load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;

use crate::constants::library::{MIN_FUZZY_SCORE, SONG_EXTENSION};
use crate::error::{Error, Result};
use crate::key::KeyDetector;
use crate::song::{NewSong, Song};

/// Regex matching song filenames like `Oasis - Wonderwall`.
#[allow(clippy::expect_used)]
static RE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+-\s+(.+)$").expect("valid regex: RE_FILENAME")
});

/// Split a file stem into (artist, title); artist is empty without a separator.
fn parse_song_filename(stem: &str) -> (String, String) {
    RE_FILENAME.captures(stem).map_or_else(
        || (String::new(), stem.trim().to_string()),
        |caps| {
            let artist = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let title = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            (artist, title)
        },
    )
}

/// Load a single chord sheet file as a song.
pub fn load_song_file(path: &Path, detector: &KeyDetector) -> Result<Song> {
    let raw_content = fs_err::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            Error::parse("chord sheet is not valid UTF-8", path.to_path_buf())
        } else {
            Error::io(e, path.to_path_buf())
        }
    })?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Library(format!("Unusable song file name: {}", path.display())))?;
    let (artist, title) = parse_song_filename(stem);

    Ok(Song::ingest(NewSong { title, artist, key: None, raw_content }, detector))
}

/// Lazily loaded song directory index.
pub struct SongLibrary {
    library_path: PathBuf,
    detector: KeyDetector,
    by_title: HashMap<String, usize>,
    songs: Vec<Song>,
    loaded: bool,
}

impl SongLibrary {
    /// Create a library backed by the given directory, keying songs with `detector`.
    pub fn new(path: PathBuf, detector: KeyDetector) -> Self {
        Self {
            library_path: path,
            detector,
            by_title: HashMap::new(),
            songs: Vec::new(),
            loaded: false,
        }
    }

    /// Directory this library reads from.
    pub fn path(&self) -> &Path {
        &self.library_path
    }

    /// All songs, sorted by title.
    pub fn songs(&mut self) -> &[Song] {
        self.ensure_loaded();
        &self.songs
    }

    /// Find a song by title: exact or substring match first, then fuzzy match.
    pub fn lookup(&mut self, query: &str) -> Option<&Song> {
        self.ensure_loaded();

        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return None;
        }

        if let Some(&idx) = self.by_title.get(&query_lower) {
            return self.songs.get(idx);
        }

        // Substring match wins over fuzzy scoring
        if let Some(song) = self.songs.iter().find(|song| {
            let title_lower = song.title.to_lowercase();
            query_lower.contains(&title_lower) || title_lower.contains(&query_lower)
        }) {
            return Some(song);
        }

        let matcher = SkimMatcherV2::default();
        self.songs
            .iter()
            .filter_map(|song| {
                let score = matcher.fuzzy_match(&song.title, query)?;
                (score >= MIN_FUZZY_SCORE).then_some((score, song))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, song)| song)
    }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load();
        }
    }

    fn load(&mut self) {
        self.loaded = true;

        let dir = match std::fs::read_dir(&self.library_path) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Failed to read song library {}: {e}", self.library_path.display());
                return;
            }
        };

        for entry in dir.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|e| e != SONG_EXTENSION) {
                continue;
            }

            match load_song_file(&path, &self.detector) {
                Ok(song) => self.songs.push(song),
                Err(e) => tracing::warn!("Skipping song file: {e}"),
            }
        }

        self.songs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        self.by_title = self
            .songs
            .iter()
            .enumerate()
            .map(|(idx, song)| (song.title.to_lowercase(), idx))
            .collect();

        tracing::info!(
            "Loaded {} songs from {} using {}",
            self.songs.len(),
            self.library_path.display(),
            self.detector.kind()
        );
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::key::StrategyKind;

    fn library_with(files: &[(&str, &str)]) -> (tempfile::TempDir, SongLibrary) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let library = SongLibrary::new(dir.path().to_path_buf(), KeyDetector::new(StrategyKind::Frequency));
        (dir, library)
    }

    #[test]
    fn test_parse_song_filename() {
        assert_eq!(
            parse_song_filename("Oasis - Wonderwall"),
            ("Oasis".to_string(), "Wonderwall".to_string())
        );
        assert_eq!(
            parse_song_filename("John Newton - Amazing Grace - Live"),
            ("John Newton".to_string(), "Amazing Grace - Live".to_string())
        );
        assert_eq!(parse_song_filename("Amazing Grace"), (String::new(), "Amazing Grace".to_string()));
        assert_eq!(parse_song_filename("Re-Entry"), (String::new(), "Re-Entry".to_string()));
    }

    #[test]
    fn test_loads_and_sorts_songs() {
        let (_dir, mut library) = library_with(&[
            ("Oasis - Wonderwall.txt", "Em7   G\nToday is gonna be the day"),
            ("Amazing Grace.txt", "G        C     G\nAmazing grace how sweet the sound"),
            ("notes.md", "not a song"),
        ]);

        let titles: Vec<&str> = library.songs().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Amazing Grace", "Wonderwall"]);

        let wonderwall = library.lookup("wonderwall").unwrap();
        assert_eq!(wonderwall.artist, "Oasis");
        assert_eq!(wonderwall.key.as_deref(), Some("Em"));
    }

    #[test]
    fn test_lookup_substring_and_fuzzy() {
        let (_dir, mut library) = library_with(&[
            ("Be Thou My Vision.txt", "D   G\nBe thou my vision"),
            ("How Great Thou Art.txt", "A   D\nO Lord my God"),
        ]);

        assert_eq!(library.lookup("Great Thou").unwrap().title, "How Great Thou Art");
        assert_eq!(library.lookup("be thou my vision (hymn)").unwrap().title, "Be Thou My Vision");
        assert_eq!(library.lookup("Be Thou Vision").unwrap().title, "Be Thou My Vision");
        assert!(library.lookup("   ").is_none());
    }

    #[test]
    fn test_invalid_utf8_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.txt"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.path().join("Fine.txt"), "C\nok").unwrap();

        let err = load_song_file(&dir.path().join("Broken.txt"), &KeyDetector::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        let mut library = SongLibrary::new(dir.path().to_path_buf(), KeyDetector::default());
        assert_eq!(library.songs().len(), 1);
    }

    #[test]
    fn test_missing_directory_loads_empty() {
        let mut library = SongLibrary::new(
            PathBuf::from("/tmp/nonexistent_song_library_chordbook_test"),
            KeyDetector::default(),
        );
        assert!(library.songs().is_empty());
        assert!(library.lookup("Anything").is_none());
    }
}
