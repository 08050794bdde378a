//! Scale-membership key detection.
//!
//! Every one of the 24 major and natural minor keys is scored against the song's
//! chords:
//! - a chord whose root is in the key's scale earns 2 points
//! - each chord also earns the fraction of its notes that are in the scale
//! - both are multiplied by a position weight: 3 for the opening chord, 2 for the
//!   closing chord, 1 otherwise
//!
//! The best key's confidence compares its score to 5 points per chord.

use crate::constants::key::{
    FIRST_CHORD_WEIGHT, INNER_CHORD_WEIGHT, LAST_CHORD_WEIGHT, MAX_ALTERNATIVES, MAX_CONFIDENCE,
    MAX_POINTS_PER_CHORD, ROOT_IN_SCALE_POINTS,
};
use crate::theory::{ChordNotes, MusicTheory};
use crate::types::{KeyCandidate, KeyResult};

/// Candidate keys in scoring order; earlier keys win ties.
pub const CANDIDATE_KEYS: [&str; 24] = [
    "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
    "Am", "Em", "Bm", "F#m", "C#m", "G#m", "D#m", "Bbm", "Fm", "Cm", "Gm", "Dm",
];

/// Weight of the chord at `index` in a song of `len` chords.
fn position_weight(index: usize, len: usize) -> f64 {
    if index == 0 {
        FIRST_CHORD_WEIGHT
    } else if index + 1 == len {
        LAST_CHORD_WEIGHT
    } else {
        INNER_CHORD_WEIGHT
    }
}

/// Score of one key given its scale and the resolved chords of a song.
fn score_key(scale: &[String], chords: &[Option<ChordNotes>]) -> f64 {
    chords
        .iter()
        .enumerate()
        .filter_map(|(index, chord)| chord.as_ref().map(|c| (position_weight(index, chords.len()), c)))
        .map(|(weight, chord)| {
            let mut score = 0.0;
            if scale.contains(&chord.root) {
                score += ROOT_IN_SCALE_POINTS * weight;
            }
            if !chord.notes.is_empty() {
                let in_scale = chord.notes.iter().filter(|n| scale.contains(n)).count();
                #[allow(clippy::cast_precision_loss)]
                let fraction = in_scale as f64 / chord.notes.len() as f64;
                score += fraction * weight;
            }
            score
        })
        .sum()
}

/// Score every candidate key, in candidate order.
pub fn score_keys<S, T>(symbols: &[S], theory: &T) -> Vec<(&'static str, f64)>
where
    S: AsRef<str>,
    T: MusicTheory + ?Sized,
{
    let chords: Vec<Option<ChordNotes>> = symbols
        .iter()
        .map(|s| theory.chord_notes(s.as_ref()))
        .collect();

    CANDIDATE_KEYS
        .iter()
        .map(|&key| {
            let score = theory
                .scale_notes(key)
                .map_or(0.0, |scale| score_key(&scale, &chords));
            (key, score)
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded(score: f64) -> u32 {
    score.round() as u32
}

/// Detect the key of a chord sequence by scale membership.
///
/// Returns no key when the sequence is empty or no chord could be resolved.
pub fn detect_key<S, T>(symbols: &[S], theory: &T) -> KeyResult
where
    S: AsRef<str>,
    T: MusicTheory + ?Sized,
{
    if symbols.is_empty() {
        return KeyResult::none();
    }

    let mut ranked: Vec<(&str, f64)> = score_keys(symbols, theory)
        .into_iter()
        .filter(|(_, score)| *score > 0.0)
        .collect();
    // Stable sort keeps candidate order among equal scores
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let Some(&(best_key, best_score)) = ranked.first() else {
        return KeyResult::none();
    };

    #[allow(clippy::cast_precision_loss)]
    let max_score = symbols.len() as f64 * MAX_POINTS_PER_CHORD;
    let confidence = (best_score / max_score * 100.0).min(MAX_CONFIDENCE);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence = confidence.round() as u8;

    KeyResult {
        key: Some(best_key.to_string()),
        confidence,
        alternatives: ranked
            .iter()
            .skip(1)
            .take(MAX_ALTERNATIVES)
            .map(|&(key, score)| KeyCandidate { key: key.to_string(), score: rounded(score) })
            .collect(),
    }
}
