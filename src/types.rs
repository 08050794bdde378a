//! Core data model shared by the parser, renderer and key detectors.
//!
//! Everything here is derived data: it is computed from a song's raw text on demand
//! and can be thrown away and recomputed at any time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chord symbol anchored to a character offset in the lyric line beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordToken {
    /// Chord text exactly as typed (e.g. `C#m7`, `G/B`).
    #[serde(rename = "chord", alias = "symbol")]
    pub symbol: String,
    /// Zero-based character offset within the paired lyric line.
    pub position: usize,
}

impl ChordToken {
    /// Create a new chord token.
    pub fn new(symbol: impl Into<String>, position: usize) -> Self {
        Self { symbol: symbol.into(), position }
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.position)
    }
}

/// One line of a structured song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuredLine {
    /// Section heading such as `[Verse 1]`.
    Heading {
        /// Trimmed heading text including the brackets.
        content: String,
    },
    /// Blank separator line.
    Empty,
    /// Lyric text with the chords played over it.
    Lyric {
        /// Lyric text, untrimmed; empty for chord-only lines.
        content: String,
        /// Chords in creation order; sort by position before rendering.
        #[serde(default)]
        chords: Vec<ChordToken>,
    },
}

impl StructuredLine {
    /// Create a heading line.
    pub fn heading(content: impl Into<String>) -> Self {
        Self::Heading { content: content.into() }
    }

    /// Create a lyric line.
    pub fn lyric(content: impl Into<String>, chords: Vec<ChordToken>) -> Self {
        Self::Lyric { content: content.into(), chords }
    }

    /// Text content of the line (empty for `Empty`).
    pub fn content(&self) -> &str {
        match self {
            Self::Heading { content } | Self::Lyric { content, .. } => content,
            Self::Empty => "",
        }
    }

    /// Chords attached to the line; only lyric lines carry any.
    pub fn chords(&self) -> &[ChordToken] {
        match self {
            Self::Lyric { chords, .. } => chords,
            Self::Heading { .. } | Self::Empty => &[],
        }
    }

    /// Chords ordered by ascending position, ready for rendering.
    pub fn sorted_chords(&self) -> Vec<&ChordToken> {
        let mut chords: Vec<&ChordToken> = self.chords().iter().collect();
        chords.sort_by_key(|c| c.position);
        chords
    }
}

/// A scored key that lost to the best guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCandidate {
    /// Key name (e.g. `G`, `Em`).
    pub key: String,
    /// Rounded score.
    pub score: u32,
}

/// Outcome of key detection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyResult {
    /// Best key, `None` when no chords were found.
    pub key: Option<String>,
    /// Confidence percentage, 0 to 100.
    pub confidence: u8,
    /// Up to three runner-up keys, best first.
    pub alternatives: Vec<KeyCandidate>,
}

impl KeyResult {
    /// Result signalling that no chords were found.
    pub const fn none() -> Self {
        Self { key: None, confidence: 0, alternatives: Vec::new() }
    }

    /// Result carrying only a key, without a measured confidence.
    pub fn bare(key: impl Into<String>) -> Self {
        Self { key: Some(key.into()), confidence: 0, alternatives: Vec::new() }
    }
}
