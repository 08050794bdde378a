//! Lyrics processing module.
//!
//! Turns free-form chord sheets (chord rows typed above lyric rows) into
//! [`StructuredLine`](crate::types::StructuredLine)s and back into text.
//!
//! - [`classify`]: decides whether a row is made of chords
//! - [`structure`]: pairs chord rows with the lyric rows beneath them
//! - [`render`]: lays chords out above lyrics again, optionally transposed

pub mod classify;
pub mod render;
pub mod structure;

pub use classify::{is_chord_line, is_chord_symbol};
pub use render::render_song;
pub use structure::{extract_chords_from_song, parse_raw_content};
