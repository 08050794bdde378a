//! Chord symbol spelling.
//!
//! Turns a chord symbol into its root and spelled note names (`Bbm7` ->
//! `Bb Db F Ab`). Qualities are read with a prefix scan: triad quality first,
//! then an optional extension number, then add/no/sus/altered-tone modifiers.
//! Anything left over that isn't understood makes the whole chord unresolvable.

use crate::theory::pitch::{Interval, SpelledNote};

const MAJOR_SECOND: Interval = Interval::new(1, 2);
const MINOR_THIRD: Interval = Interval::new(2, 3);
const MAJOR_THIRD: Interval = Interval::new(2, 4);
const PERFECT_FOURTH: Interval = Interval::new(3, 5);
const DIMINISHED_FIFTH: Interval = Interval::new(4, 6);
const PERFECT_FIFTH: Interval = Interval::new(4, 7);
const AUGMENTED_FIFTH: Interval = Interval::new(4, 8);
const MAJOR_SIXTH: Interval = Interval::new(5, 9);
const DIMINISHED_SEVENTH: Interval = Interval::new(6, 9);
const MINOR_SEVENTH: Interval = Interval::new(6, 10);
const MAJOR_SEVENTH: Interval = Interval::new(6, 11);
const MINOR_NINTH: Interval = Interval::new(1, 1);
const MAJOR_NINTH: Interval = Interval::new(1, 2);
const AUGMENTED_NINTH: Interval = Interval::new(1, 3);
const PERFECT_ELEVENTH: Interval = Interval::new(3, 5);
const AUGMENTED_ELEVENTH: Interval = Interval::new(3, 6);
const MINOR_THIRTEENTH: Interval = Interval::new(5, 8);
const MAJOR_THIRTEENTH: Interval = Interval::new(5, 9);

/// Root and constituent notes of a chord, as spelled note names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordNotes {
    /// Root note name (e.g. `C#`).
    pub root: String,
    /// Every note of the chord, root first, including a slash bass.
    pub notes: Vec<String>,
}

/// Triad family, which decides how an extension number is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Major,
    MajorSeventh,
    Minor,
    Augmented,
    Diminished,
    Suspended,
    Fixed,
}

/// Interval content of a chord, built up while scanning the suffix.
#[derive(Debug, Clone)]
struct ChordShape {
    third: Option<Interval>,
    fifth: Option<Interval>,
    seventh: Option<Interval>,
    extensions: Vec<Interval>,
}

impl ChordShape {
    const fn triad(third: Interval, fifth: Interval) -> Self {
        Self { third: Some(third), fifth: Some(fifth), seventh: None, extensions: Vec::new() }
    }

    fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.third
            .into_iter()
            .chain(self.fifth)
            .chain(self.seventh)
            .chain(self.extensions.iter().copied())
    }

    /// Apply the extension number following the triad quality.
    fn extend(&mut self, family: Family, number: u32) -> Option<()> {
        let seventh = match family {
            Family::MajorSeventh => MAJOR_SEVENTH,
            Family::Diminished => DIMINISHED_SEVENTH,
            _ => MINOR_SEVENTH,
        };

        match (family, number) {
            (Family::Suspended, 2) => self.third = Some(MAJOR_SECOND),
            (Family::Suspended, 4) => self.third = Some(PERFECT_FOURTH),
            (Family::Major, 2) => self.third = Some(MAJOR_SECOND),
            (Family::Major, 5) => self.third = None,
            (Family::Major | Family::MajorSeventh | Family::Minor, 6) => self.extensions.push(MAJOR_SIXTH),
            (Family::Diminished, 7) => self.seventh = Some(seventh),
            (Family::Suspended | Family::Fixed | Family::Diminished, _) => return None,
            (_, 7) => self.seventh = Some(seventh),
            (_, 9) => {
                self.seventh = Some(seventh);
                self.extensions.push(MAJOR_NINTH);
            }
            (_, 11) => {
                self.seventh = Some(seventh);
                self.extensions.extend([MAJOR_NINTH, PERFECT_ELEVENTH]);
            }
            (_, 13) => {
                self.seventh = Some(seventh);
                self.extensions.extend([MAJOR_NINTH, MAJOR_THIRTEENTH]);
            }
            _ => return None,
        }
        Some(())
    }

    /// Apply one trailing modifier, returning the unread remainder.
    fn modify<'a>(&mut self, rest: &'a str) -> Option<&'a str> {
        const ADDITIONS: [(&str, Interval); 6] = [
            ("add13", MAJOR_THIRTEENTH),
            ("add11", PERFECT_ELEVENTH),
            ("add9", MAJOR_NINTH),
            ("add6", MAJOR_SIXTH),
            ("add4", PERFECT_FOURTH),
            ("add2", MAJOR_SECOND),
        ];
        const ALTERATIONS: [(&str, Interval); 8] = [
            ("#11", AUGMENTED_ELEVENTH),
            ("+11", AUGMENTED_ELEVENTH),
            ("b13", MINOR_THIRTEENTH),
            ("-13", MINOR_THIRTEENTH),
            ("b9", MINOR_NINTH),
            ("-9", MINOR_NINTH),
            ("#9", AUGMENTED_NINTH),
            ("+9", AUGMENTED_NINTH),
        ];

        for (prefix, interval) in ADDITIONS {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                self.extensions.push(interval);
                return Some(stripped);
            }
        }
        for (prefix, interval) in ALTERATIONS {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                // An altered ninth replaces the natural one implied by 9/11/13
                if interval.steps == 1 {
                    self.extensions.retain(|i| i.steps != 1);
                }
                self.extensions.push(interval);
                return Some(stripped);
            }
        }

        if let Some(stripped) = rest.strip_prefix("sus2") {
            self.third = Some(MAJOR_SECOND);
            Some(stripped)
        } else if let Some(stripped) = rest.strip_prefix("sus4").or_else(|| rest.strip_prefix("sus")) {
            self.third = Some(PERFECT_FOURTH);
            Some(stripped)
        } else if let Some(stripped) = rest.strip_prefix("no3") {
            self.third = None;
            Some(stripped)
        } else if let Some(stripped) = rest.strip_prefix("no5") {
            self.fifth = None;
            Some(stripped)
        } else if let Some(stripped) = rest.strip_prefix("b5").or_else(|| rest.strip_prefix("-5")) {
            self.fifth = Some(DIMINISHED_FIFTH);
            Some(stripped)
        } else if let Some(stripped) = rest
            .strip_prefix("#5")
            .or_else(|| rest.strip_prefix("+5"))
            .or_else(|| rest.strip_prefix('+'))
        {
            self.fifth = Some(AUGMENTED_FIFTH);
            Some(stripped)
        } else {
            None
        }
    }
}

/// Split a leading run of ASCII digits off `s`.
///
/// Returns `None` when digits are present but don't fit a `u32`.
fn leading_number(s: &str) -> Option<(Option<u32>, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return Some((None, s));
    }
    let number = s[..end].parse().ok()?;
    Some((Some(number), &s[end..]))
}

/// Read the triad quality at the start of a chord suffix.
fn quality(suffix: &str) -> (Family, ChordShape, &str) {
    let major = ChordShape::triad(MAJOR_THIRD, PERFECT_FIFTH);
    let minor = ChordShape::triad(MINOR_THIRD, PERFECT_FIFTH);
    let diminished = ChordShape::triad(MINOR_THIRD, DIMINISHED_FIFTH);

    if let Some(rest) = suffix.strip_prefix("m7b5").or_else(|| suffix.strip_prefix("ø7")) {
        let mut shape = diminished;
        shape.seventh = Some(MINOR_SEVENTH);
        (Family::Fixed, shape, rest)
    } else if let Some(rest) = suffix.strip_prefix("dim") {
        (Family::Diminished, diminished, rest)
    } else if let Some(rest) = suffix.strip_prefix("aug") {
        (Family::Augmented, ChordShape::triad(MAJOR_THIRD, AUGMENTED_FIFTH), rest)
    } else if let Some(rest) = suffix.strip_prefix("maj").or_else(|| suffix.strip_prefix('M')) {
        (Family::MajorSeventh, major, rest)
    } else if let Some(rest) = suffix.strip_prefix("min").or_else(|| suffix.strip_prefix('m')) {
        (Family::Minor, minor, rest)
    } else if let Some(rest) = suffix.strip_prefix("sus") {
        let mut shape = major;
        shape.third = Some(PERFECT_FOURTH);
        (Family::Suspended, shape, rest)
    } else {
        (Family::Major, major, suffix)
    }
}

/// Spell a chord symbol into its root and note names.
///
/// Returns `None` when the root or any part of the quality isn't recognized.
pub fn spell_chord(symbol: &str) -> Option<ChordNotes> {
    let symbol = symbol.trim();
    let (main, bass) = match symbol.split_once('/') {
        Some((main, bass)) => (main, Some(SpelledNote::parse(bass)?)),
        None => (symbol, None),
    };

    let mut chars = main.char_indices();
    chars.next()?;
    let root_end = match chars.next() {
        Some((i, '#' | 'b')) => i + 1,
        Some((i, _)) => i,
        None => main.len(),
    };
    let root = SpelledNote::parse(&main[..root_end])?;

    let (family, mut shape, rest) = quality(&main[root_end..]);
    let (number, mut rest) = leading_number(rest)?;
    if let Some(number) = number {
        shape.extend(family, number)?;
    }
    while !rest.is_empty() {
        rest = shape.modify(rest)?;
    }

    let mut notes = vec![root.to_string()];
    let upper = shape.intervals().map(|interval| root.up(interval));
    for note in upper.chain(bass) {
        let name = note.to_string();
        if !notes.contains(&name) {
            notes.push(name);
        }
    }

    Some(ChordNotes { root: root.to_string(), notes })
}
