//! Chord row detection.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching a single chord symbol: root, accidental, quality, extension,
/// add/no/sus modifier, signed alteration and slash bass.
#[allow(clippy::expect_used)]
static RE_CHORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-G](?:#|b)?(?:m|maj|min|dim|aug|sus|M)?(?:[0-9]|1[0-3])?(?:(?:add|no|sus)[0-9]+)?(?:[-+][0-9])?(?:/[A-G](?:#|b)?)?$",
    )
    .expect("valid regex: RE_CHORD")
});

/// Check whether a single token looks like a chord symbol.
pub fn is_chord_symbol(token: &str) -> bool {
    RE_CHORD.is_match(token)
}

/// Check whether a line is a chord row.
///
/// Headings (`[Chorus]`) and labels (`Verse:`) never count. Otherwise the line
/// qualifies when at least half of its whitespace-separated tokens are chords.
pub fn is_chord_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.ends_with(':') {
        return false;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }

    let chord_count = tokens.iter().filter(|t| is_chord_symbol(t)).count();
    // chord_count >= tokens / 2, without truncating odd token counts
    chord_count * 2 >= tokens.len()
}
