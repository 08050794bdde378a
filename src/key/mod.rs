//! Key detection strategies.
//!
//! Two heuristics are available and the caller picks one explicitly:
//! - [`frequency`]: the most played chord, favouring the opener. Needs no theory data
//!   and always answers (`C` for songs without chords).
//! - [`scale`]: scores all 24 major/minor keys by scale membership of the chords and
//!   reports a confidence plus alternatives.
//!
//! The two can disagree on the same song; neither is treated as authoritative.

pub mod frequency;
pub mod scale;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::lyrics::extract_chords_from_song;
use crate::theory::{BuiltinTheory, MusicTheory};
use crate::types::{KeyResult, StructuredLine};

/// Trait for key detection strategies.
///
/// Lets callers swap heuristics without touching parsing or transposition.
pub trait KeyStrategy: Send + Sync {
    /// Detect the key of a structured song.
    fn detect(&self, lines: &[StructuredLine]) -> KeyResult;

    /// Get the name of this strategy (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Most-played-chord strategy.
///
/// Its result always carries a key and reports confidence 0: the heuristic doesn't
/// measure one and has no alternatives.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyStrategy;

impl KeyStrategy for FrequencyStrategy {
    fn detect(&self, lines: &[StructuredLine]) -> KeyResult {
        KeyResult::bare(frequency::detect_key(lines))
    }

    fn name(&self) -> &'static str {
        "FrequencyStrategy"
    }
}

/// Scale-membership strategy backed by a [`MusicTheory`] source.
#[derive(Debug, Clone, Default)]
pub struct ScaleStrategy<T = BuiltinTheory> {
    theory: T,
}

impl<T: MusicTheory> ScaleStrategy<T> {
    /// Create a scale strategy using the given theory source.
    pub const fn new(theory: T) -> Self {
        Self { theory }
    }
}

impl<T: MusicTheory + Send + Sync> KeyStrategy for ScaleStrategy<T> {
    fn detect(&self, lines: &[StructuredLine]) -> KeyResult {
        scale::detect_key(&extract_chords_from_song(lines), &self.theory)
    }

    fn name(&self) -> &'static str {
        "ScaleStrategy"
    }
}

/// Which key detection strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Chord frequency heuristic.
    #[default]
    Frequency,
    /// Scale membership scoring.
    Scale,
}

impl StrategyKind {
    /// Returns the configuration name of this strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frequency" => Ok(Self::Frequency),
            "scale" => Ok(Self::Scale),
            other => Err(Error::config(
                format!("Unknown key strategy '{other}'"),
                "Use 'frequency' or 'scale'",
            )),
        }
    }
}

/// The built-in strategies behind one interface.
#[derive(Debug, Clone)]
pub enum KeyDetector {
    /// Chord frequency heuristic.
    Frequency(FrequencyStrategy),
    /// Scale membership scoring with the built-in theory tables.
    Scale(ScaleStrategy),
}

impl KeyDetector {
    /// Create the detector for a strategy kind.
    pub fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Frequency => Self::Frequency(FrequencyStrategy),
            StrategyKind::Scale => Self::Scale(ScaleStrategy::default()),
        }
    }

    /// Which strategy this detector runs.
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Frequency(_) => StrategyKind::Frequency,
            Self::Scale(_) => StrategyKind::Scale,
        }
    }
}

impl Default for KeyDetector {
    fn default() -> Self {
        Self::new(StrategyKind::default())
    }
}

impl From<StrategyKind> for KeyDetector {
    fn from(kind: StrategyKind) -> Self {
        Self::new(kind)
    }
}

impl KeyStrategy for KeyDetector {
    fn detect(&self, lines: &[StructuredLine]) -> KeyResult {
        let result = match self {
            Self::Frequency(strategy) => strategy.detect(lines),
            Self::Scale(strategy) => strategy.detect(lines),
        };
        tracing::debug!("{} detected key {:?} ({}%)", self.name(), result.key, result.confidence);
        result
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Frequency(strategy) => strategy.name(),
            Self::Scale(strategy) => strategy.name(),
        }
    }
}
