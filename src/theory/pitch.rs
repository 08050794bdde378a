//! Note names, pitch classes and interval spelling.

use std::fmt;

/// Chromatic note names using sharps, indexed by pitch class.
pub const NOTES_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Chromatic note names using flats, indexed by pitch class.
pub const NOTES_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// Chord root spellings and their pitch class.
const NOTE_TO_INDEX: [(&str, usize); 17] = [
    ("C", 0), ("C#", 1), ("Db", 1),
    ("D", 2), ("D#", 3), ("Eb", 3),
    ("E", 4),
    ("F", 5), ("F#", 6), ("Gb", 6),
    ("G", 7), ("G#", 8), ("Ab", 8),
    ("A", 9), ("A#", 10), ("Bb", 10),
    ("B", 11),
];

/// Natural letters in diatonic order, starting from C.
const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Pitch class of each natural letter in `LETTERS`.
const LETTER_PITCH: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Look up the pitch class (0-11) of a chord root such as `C#` or `Bb`.
///
/// Only single accidentals are recognized; `E#`, `Cb` and friends are not roots.
pub fn pitch_class(root: &str) -> Option<usize> {
    NOTE_TO_INDEX
        .iter()
        .find(|(name, _)| *name == root)
        .map(|&(_, index)| index)
}

/// Interval measured both in letter steps and in semitones, so the target note
/// can be spelled correctly (a major third above `Db` is `F`, not `E#`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Diatonic letter steps above the root (a third is 2).
    pub steps: u8,
    /// Chromatic distance above the root.
    pub semitones: u8,
}

impl Interval {
    /// Create an interval from letter steps and semitones.
    pub const fn new(steps: u8, semitones: u8) -> Self {
        Self { steps, semitones }
    }
}

/// A note name with its letter and accidentals kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpelledNote {
    letter: usize,
    alteration: i32,
}

impl SpelledNote {
    /// Parse a note name: one letter `A`-`G` followed by any number of `#` or of `b`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let first = chars.next()?;
        let letter = LETTERS.iter().position(|&l| l == first)?;
        let rest = chars.as_str();

        let sharps = rest.chars().filter(|&c| c == '#').count();
        let flats = rest.chars().filter(|&c| c == 'b').count();
        if sharps + flats != rest.len() || (sharps > 0 && flats > 0) {
            return None;
        }

        let alteration = i32::try_from(sharps).ok()? - i32::try_from(flats).ok()?;
        Some(Self { letter, alteration })
    }

    /// Spell the note lying `interval` above this one.
    pub fn up(self, interval: Interval) -> Self {
        let letter = (self.letter + usize::from(interval.steps)) % 7;
        let target = LETTER_PITCH[self.letter] + self.alteration + i32::from(interval.semitones);
        let mut alteration = (target - LETTER_PITCH[letter]).rem_euclid(12);
        if alteration > 6 {
            alteration -= 12;
        }
        Self { letter, alteration }
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LETTERS[self.letter])?;
        let accidental = if self.alteration >= 0 { "#" } else { "b" };
        for _ in 0..self.alteration.unsigned_abs() {
            f.write_str(accidental)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_pitch_class_table() {
        assert_eq!(pitch_class("C"), Some(0));
        assert_eq!(pitch_class("C#"), Some(1));
        assert_eq!(pitch_class("Db"), Some(1));
        assert_eq!(pitch_class("Bb"), Some(10));
        assert_eq!(pitch_class("B"), Some(11));
        assert_eq!(pitch_class("Cb"), None);
        assert_eq!(pitch_class("H"), None);
    }

    #[test]
    fn test_tables_agree_with_lookup() {
        for (index, (sharp, flat)) in NOTES_SHARP.iter().zip(NOTES_FLAT.iter()).enumerate() {
            assert_eq!(pitch_class(sharp), Some(index));
            assert_eq!(pitch_class(flat), Some(index));
        }
    }

    #[test]
    fn test_spelled_note_roundtrip() {
        for name in ["C", "F#", "Bb", "E#", "Cb", "F##", "Bbb"] {
            assert_eq!(SpelledNote::parse(name).unwrap().to_string(), name);
        }
        assert!(SpelledNote::parse("").is_none());
        assert!(SpelledNote::parse("H").is_none());
        assert!(SpelledNote::parse("C#b").is_none());
    }

    #[test]
    fn test_interval_spelling() {
        let major_third = Interval::new(2, 4);
        let db = SpelledNote::parse("Db").unwrap();
        assert_eq!(db.up(major_third).to_string(), "F");

        let c_sharp = SpelledNote::parse("C#").unwrap();
        assert_eq!(c_sharp.up(major_third).to_string(), "E#");

        let fifth = Interval::new(4, 7);
        assert_eq!(SpelledNote::parse("B").unwrap().up(fifth).to_string(), "F#");
        assert_eq!(SpelledNote::parse("Bb").unwrap().up(fifth).to_string(), "F");
    }
}
