//! Frequency-based key guess.
//!
//! Counts how often each base chord is played and favours the opening chord when
//! it is also among the most played ones.

use std::collections::HashMap;

use crate::constants::key::{FALLBACK_KEY, FIRST_CHORD_RANK_WINDOW};
use crate::types::StructuredLine;

/// Reduce a chord to its base form: slash bass and digits removed (`A7sus4/E` -> `Asus`).
pub fn base_chord(symbol: &str) -> String {
    let upper = symbol.split_once('/').map_or(symbol, |(upper, _)| upper);
    upper.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Guess a song's key from chord frequencies.
///
/// Returns the first chord of the song if it ranks in the top two by count,
/// otherwise the most played chord. Songs without chords fall back to `C`.
pub fn detect_key(lines: &[StructuredLine]) -> String {
    // Distinct base chords in first-seen order, with their counts
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for chord in lines.iter().flat_map(StructuredLine::chords) {
        let base = base_chord(&chord.symbol);
        let count = counts.entry(base.clone()).or_insert(0);
        if *count == 0 {
            order.push(base);
        }
        *count += 1;
    }

    let Some(first_chord) = order.first().cloned() else {
        return FALLBACK_KEY.to_string();
    };

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|base| {
            let count = counts.get(&base).copied().unwrap_or_default();
            (base, count)
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if ranked
        .iter()
        .take(FIRST_CHORD_RANK_WINDOW)
        .any(|(base, _)| *base == first_chord)
    {
        return first_chord;
    }

    ranked
        .into_iter()
        .next()
        .map_or_else(|| FALLBACK_KEY.to_string(), |(base, _)| base)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::lyrics::parse_raw_content;
    use crate::types::ChordToken;

    fn song(chords: &[&str]) -> Vec<StructuredLine> {
        chords
            .iter()
            .map(|c| StructuredLine::lyric("la", vec![ChordToken::new(*c, 0)]))
            .collect()
    }

    #[test]
    fn test_base_chord() {
        assert_eq!(base_chord("G"), "G");
        assert_eq!(base_chord("Em7"), "Em");
        assert_eq!(base_chord("A7sus4/E"), "Asus");
        assert_eq!(base_chord("D/F#"), "D");
        assert_eq!(base_chord("C13"), "C");
    }

    #[test]
    fn test_first_and_most_frequent() {
        assert_eq!(detect_key(&song(&["G", "G", "C", "Em"])), "G");
    }

    #[test]
    fn test_first_chord_in_top_two_wins() {
        assert_eq!(detect_key(&song(&["D", "G", "G", "G", "D", "A"])), "D");
    }

    #[test]
    fn test_first_chord_outside_top_two_loses() {
        assert_eq!(detect_key(&song(&["Bm", "G", "G", "G", "D", "D", "A"])), "G");
    }

    #[test]
    fn test_tie_break_is_first_seen_order() {
        // C, F, G are played twice each; the Am opener ranks last
        assert_eq!(detect_key(&song(&["Am", "C", "F", "G", "C", "F", "G"])), "C");
    }

    #[test]
    fn test_extensions_and_bass_fold_together() {
        assert_eq!(detect_key(&song(&["Am", "G/B", "G7", "G", "C", "C"])), "G");
    }

    #[test]
    fn test_no_chords_falls_back_to_c() {
        assert_eq!(detect_key(&[]), "C");
        assert_eq!(detect_key(&parse_raw_content("[Verse]\nJust words")), "C");
    }
}
