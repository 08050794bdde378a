//! Music theory lookups used by scale-based key detection.
//!
//! Key detection only needs two questions answered: which notes make up a key's
//! scale, and which notes make up a chord. [`MusicTheory`] is that contract, so a
//! caller can plug in a different theory source; [`BuiltinTheory`] answers both
//! with correctly spelled note names.

use crate::theory::chord::{spell_chord, ChordNotes};
use crate::theory::pitch::{Interval, SpelledNote};

/// Major scale degrees.
const MAJOR_SCALE: [Interval; 7] = [
    Interval::new(0, 0),
    Interval::new(1, 2),
    Interval::new(2, 4),
    Interval::new(3, 5),
    Interval::new(4, 7),
    Interval::new(5, 9),
    Interval::new(6, 11),
];

/// Natural minor scale degrees.
const NATURAL_MINOR_SCALE: [Interval; 7] = [
    Interval::new(0, 0),
    Interval::new(1, 2),
    Interval::new(2, 3),
    Interval::new(3, 5),
    Interval::new(4, 7),
    Interval::new(5, 8),
    Interval::new(6, 10),
];

/// Note and scale lookups needed to score keys.
///
/// Implementations must be pure: the same input always gives the same answer.
/// Note names are compared as spelled strings, so `C#` and `Db` are different notes.
pub trait MusicTheory {
    /// The seven note names of a key's scale (`Am` -> natural minor on A).
    fn scale_notes(&self, key: &str) -> Option<Vec<String>>;

    /// Root and notes of a chord symbol; `None` when the root can't be resolved.
    fn chord_notes(&self, symbol: &str) -> Option<ChordNotes>;
}

impl<T: MusicTheory + ?Sized> MusicTheory for &T {
    fn scale_notes(&self, key: &str) -> Option<Vec<String>> {
        (**self).scale_notes(key)
    }

    fn chord_notes(&self, symbol: &str) -> Option<ChordNotes> {
        (**self).chord_notes(symbol)
    }
}

/// Built-in theory tables with interval-based spelling.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTheory;

impl MusicTheory for BuiltinTheory {
    fn scale_notes(&self, key: &str) -> Option<Vec<String>> {
        let (tonic, degrees) = key
            .strip_suffix('m')
            .map_or((key, &MAJOR_SCALE), |tonic| (tonic, &NATURAL_MINOR_SCALE));
        let tonic = SpelledNote::parse(tonic)?;
        Some(degrees.iter().map(|&degree| tonic.up(degree).to_string()).collect())
    }

    fn chord_notes(&self, symbol: &str) -> Option<ChordNotes> {
        spell_chord(symbol)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_major_scales() {
        let theory = BuiltinTheory;
        assert_eq!(theory.scale_notes("C").unwrap(), ["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(theory.scale_notes("F#").unwrap(), ["F#", "G#", "A#", "B", "C#", "D#", "E#"]);
        assert_eq!(theory.scale_notes("Db").unwrap(), ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]);
    }

    #[test]
    fn test_natural_minor_scales() {
        let theory = BuiltinTheory;
        assert_eq!(theory.scale_notes("Am").unwrap(), ["A", "B", "C", "D", "E", "F", "G"]);
        assert_eq!(theory.scale_notes("D#m").unwrap(), ["D#", "E#", "F#", "G#", "A#", "B", "C#"]);
        assert_eq!(theory.scale_notes("Bbm").unwrap(), ["Bb", "C", "Db", "Eb", "F", "Gb", "Ab"]);
    }

    #[test]
    fn test_unknown_key() {
        assert!(BuiltinTheory.scale_notes("H").is_none());
        assert!(BuiltinTheory.scale_notes("").is_none());
    }

    #[test]
    fn test_chord_lookup_through_reference() {
        let theory = BuiltinTheory;
        let by_ref: &dyn MusicTheory = &theory;
        let chord = by_ref.chord_notes("Em").unwrap();
        assert_eq!(chord.root, "E");
        assert_eq!(chord.notes, ["E", "G", "B"]);
    }
}
