//! Plain-text chord sheet rendering.
//!
//! Chords go on their own row above the lyrics, each starting at its recorded
//! character offset. Transposed chords can grow (`E` -> `F#`); a chord that would
//! touch the one before it is pushed right to keep a single space between them.

use crate::theory::transpose_chord;
use crate::types::{ChordToken, StructuredLine};

/// Lay out a chord row, transposing every chord by `semitones`.
fn chord_row(chords: &[&ChordToken], semitones: i32) -> String {
    let mut row = String::new();
    let mut end: Option<usize> = None;

    for chord in chords {
        let symbol = transpose_chord(&chord.symbol, semitones);
        let column = end.map_or(chord.position, |end| chord.position.max(end + 1));
        let width = end.unwrap_or(0);

        row.extend(std::iter::repeat(' ').take(column - width));
        row.push_str(&symbol);
        end = Some(column + symbol.chars().count());
    }

    row
}

/// Render one structured line as one or two text rows.
pub fn render_line(line: &StructuredLine, semitones: i32) -> Vec<String> {
    match line {
        StructuredLine::Heading { content } => vec![content.clone()],
        StructuredLine::Empty => vec![String::new()],
        StructuredLine::Lyric { content, chords } if chords.is_empty() => vec![content.clone()],
        StructuredLine::Lyric { content, .. } => {
            let row = chord_row(&line.sorted_chords(), semitones);
            if content.is_empty() {
                vec![row]
            } else {
                vec![row, content.clone()]
            }
        }
    }
}

/// Render a structured song as a chord sheet, transposed by `semitones`.
pub fn render_song(lines: &[StructuredLine], semitones: i32) -> String {
    lines
        .iter()
        .flat_map(|line| render_line(line, semitones))
        .collect::<Vec<_>>()
        .join("\n")
}
