//! Chord sheet structuring.
//!
//! A chord sheet is plain text where chord rows sit above the lyric rows they
//! accompany:
//!
//! ```text
//! [Verse 1]
//! Em                G
//! Today is gonna be the day
//! ```
//!
//! Parsing merges each chord row with the lyric row beneath it and records every
//! chord's character offset, so the chord can later be drawn above the same letter.

use crate::lyrics::classify::is_chord_line;
use crate::types::{ChordToken, StructuredLine};

/// Extract every run of non-whitespace from a chord row with its character offset.
///
/// Tokens that don't look like chords are kept too; the row as a whole already
/// passed the chord row test.
fn extract_chord_tokens(line: &str) -> Vec<ChordToken> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (offset, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            if let Some((position, symbol)) = current.take() {
                tokens.push(ChordToken { symbol, position });
            }
        } else {
            current.get_or_insert_with(|| (offset, String::new())).1.push(ch);
        }
    }

    if let Some((position, symbol)) = current {
        tokens.push(ChordToken { symbol, position });
    }

    tokens
}

/// Whether `next` can serve as the lyric row for the chord row above it.
fn is_lyric_for_chords(next: &str) -> bool {
    !is_chord_line(next) && !next.trim().starts_with('[')
}

/// Classify a line that is not a chord row.
fn structure_plain_line(line: &str) -> StructuredLine {
    let trimmed = line.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        StructuredLine::heading(trimmed)
    } else if trimmed.is_empty() {
        StructuredLine::Empty
    } else {
        StructuredLine::lyric(line, Vec::new())
    }
}

/// Parse a raw chord sheet into structured lines.
///
/// Produces one entry per input line, except that a chord row directly followed by
/// a lyric row is merged into a single entry. Chord rows with nothing usable
/// beneath them (end of text, another chord row, a heading) become lyric entries
/// with empty content.
pub fn parse_raw_content(raw: &str) -> Vec<StructuredLine> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let mut structured = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_chord_line(line) {
            let chords = extract_chord_tokens(line);
            match lines.get(i + 1) {
                Some(next) if is_lyric_for_chords(next) => {
                    structured.push(StructuredLine::lyric(*next, chords));
                    i += 2;
                }
                _ => {
                    structured.push(StructuredLine::lyric("", chords));
                    i += 1;
                }
            }
        } else {
            structured.push(structure_plain_line(line));
            i += 1;
        }
    }

    tracing::trace!("Structured {} raw lines into {} entries", lines.len(), structured.len());
    structured
}

/// Flatten every chord symbol of a song, in line order.
pub fn extract_chords_from_song(lines: &[StructuredLine]) -> Vec<String> {
    lines
        .iter()
        .flat_map(StructuredLine::chords)
        .map(|c| c.symbol.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_chord_row_merges_with_lyric() {
        let lines = parse_raw_content("Em   G\nToday");
        assert_eq!(
            lines,
            vec![StructuredLine::lyric(
                "Today",
                vec![ChordToken::new("Em", 0), ChordToken::new("G", 5)]
            )]
        );
    }

    #[test]
    fn test_heading_empty_and_plain_lyric() {
        let lines = parse_raw_content("[Verse 1]\n\nHello");
        assert_eq!(
            lines,
            vec![
                StructuredLine::heading("[Verse 1]"),
                StructuredLine::Empty,
                StructuredLine::lyric("Hello", Vec::new()),
            ]
        );
    }

    #[test]
    fn test_heading_is_trimmed_but_lyrics_are_not() {
        let lines = parse_raw_content("  [Chorus]  \n   la la la  ");
        assert_eq!(lines[0], StructuredLine::heading("[Chorus]"));
        assert_eq!(lines[1].content(), "   la la la  ");
    }

    #[test]
    fn test_chord_row_at_end_of_text() {
        let lines = parse_raw_content("Hello\nG   C");
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            StructuredLine::lyric("", vec![ChordToken::new("G", 0), ChordToken::new("C", 4)])
        );
    }

    #[test]
    fn test_consecutive_chord_rows() {
        let lines = parse_raw_content("Em7  G  Dsus4  A7sus4\nC   D\nWords here");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content(), "");
        assert_eq!(lines[0].chords().len(), 4);
        assert_eq!(lines[1].content(), "Words here");
        assert_eq!(lines[1].chords(), &[ChordToken::new("C", 0), ChordToken::new("D", 4)]);
    }

    #[test]
    fn test_chord_row_before_heading() {
        let lines = parse_raw_content("G  D\n[Chorus]");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content(), "");
        assert_eq!(lines[1], StructuredLine::heading("[Chorus]"));
    }

    #[test]
    fn test_chord_row_before_blank_line_consumes_it() {
        let lines = parse_raw_content("G  D\n\nNext");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content(), "");
        assert_eq!(lines[0].chords().len(), 2);
        assert_eq!(lines[1].content(), "Next");
    }

    #[test]
    fn test_non_chord_tokens_on_chord_row_are_kept() {
        let lines = parse_raw_content("G   x2\nSing it");
        assert_eq!(lines[0].chords(), &[ChordToken::new("G", 0), ChordToken::new("x2", 4)]);
    }

    #[test]
    fn test_positions_are_character_offsets() {
        let tokens = extract_chord_tokens("é  Am  C");
        assert_eq!(tokens, vec![ChordToken::new("é", 0), ChordToken::new("Am", 3), ChordToken::new("C", 7)]);
    }

    #[test]
    fn test_empty_input_is_one_empty_line() {
        assert_eq!(parse_raw_content(""), vec![StructuredLine::Empty]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "[Intro]\nEm7  G  Dsus4  A7sus4\n\n[Verse 1]\nEm7              G\nToday is gonna be the day";
        assert_eq!(parse_raw_content(raw), parse_raw_content(raw));
    }

    #[test]
    fn test_extract_chords_from_song() {
        let lines = parse_raw_content("[Verse]\nG    C\nHello there\nEm\nWorld");
        assert_eq!(extract_chords_from_song(&lines), ["G", "C", "Em"]);
    }
}
