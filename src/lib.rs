//! `chordbook` - chord sheet parsing, transposition and key detection.
//!
//! Raw chord sheets (chord rows typed above lyric rows) are parsed into
//! structured lines with position-anchored chords, which can then be transposed,
//! rendered back to text, and analysed for their musical key.

pub mod config;
pub mod constants;
pub mod error;
pub mod key;
pub mod library;
pub mod lyrics;
pub mod song;
pub mod theory;
pub mod types;

pub use key::{KeyDetector, KeyStrategy, StrategyKind};
pub use lyrics::{extract_chords_from_song, is_chord_line, parse_raw_content, render_song};
pub use theory::{transpose_chord, BuiltinTheory, MusicTheory};
pub use types::{ChordToken, KeyCandidate, KeyResult, StructuredLine};
