//! Chord transposition.
//!
//! Only the leading root of a chord moves. Everything after it (quality,
//! extensions, and the slash bass of `G/B`) is carried over byte for byte.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::transpose::SEMITONES_PER_OCTAVE;
use crate::theory::pitch::{pitch_class, NOTES_FLAT, NOTES_SHARP};

/// Regex splitting a chord into root and suffix (`C#m7` -> `C#` + `m7`).
#[allow(clippy::expect_used)]
static RE_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-G][#b]?)(.*)$").expect("valid regex: RE_ROOT")
});

/// Transpose a chord symbol by a number of semitones.
///
/// Text that doesn't start with a chord root is returned unchanged. Flat spellings
/// are kept for flat roots and used when transposing a natural root down; sharps
/// are used otherwise. Any integer offset is accepted and wraps by octave.
pub fn transpose_chord(chord: &str, semitones: i32) -> String {
    if chord.trim().is_empty() {
        return chord.to_string();
    }

    let Some(caps) = RE_ROOT.captures(chord) else {
        return chord.to_string();
    };
    let (Some(root), Some(suffix)) = (caps.get(1), caps.get(2)) else {
        return chord.to_string();
    };
    let root = root.as_str();

    let Some(root_index) = pitch_class(root) else {
        return chord.to_string();
    };

    let new_index = shift_pitch_class(root_index, semitones);
    let use_flats = root.contains('b') || (semitones < 0 && !root.contains('#'));
    let scale = if use_flats { &NOTES_FLAT } else { &NOTES_SHARP };

    format!("{}{}", scale[new_index], suffix.as_str())
}

/// Move a pitch class by `semitones`, wrapping into 0-11.
fn shift_pitch_class(index: usize, semitones: i32) -> usize {
    // Offsets are reduced first so huge inputs can't overflow
    let offset = usize::try_from(semitones.rem_euclid(SEMITONES_PER_OCTAVE)).unwrap_or_default();
    (index + offset) % 12
}

/// Key to display once a song is transposed by `semitones`.
pub fn transposed_key(key: &str, semitones: i32) -> String {
    if semitones == 0 {
        key.to_string()
    } else {
        transpose_chord(key, semitones)
    }
}

/// Normalize a key for display: first letter uppercased, `C` when empty.
pub fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(
        || crate::constants::key::FALLBACK_KEY.to_string(),
        |first| first.to_uppercase().chain(chars).collect(),
    )
}
