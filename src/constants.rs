//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Transposition constants.
pub mod transpose {
    /// Number of pitch classes in the chromatic scale.
    pub const SEMITONES_PER_OCTAVE: i32 = 12;

    /// Lowest musically meaningful transpose offset offered to users.
    pub const MIN_OFFSET: i32 = -11;

    /// Highest musically meaningful transpose offset offered to users.
    pub const MAX_OFFSET: i32 = 11;
}

/// Key detection constants.
pub mod key {
    /// Key returned by the frequency strategy when a song has no chords.
    pub const FALLBACK_KEY: &str = "C";

    /// How many of the most frequent chords may claim the key via first position.
    pub const FIRST_CHORD_RANK_WINDOW: usize = 2;

    /// Maximum number of alternative keys reported.
    pub const MAX_ALTERNATIVES: usize = 3;

    /// Position weight of the first chord in a song.
    pub const FIRST_CHORD_WEIGHT: f64 = 3.0;

    /// Position weight of the last chord in a song.
    pub const LAST_CHORD_WEIGHT: f64 = 2.0;

    /// Position weight of every other chord.
    pub const INNER_CHORD_WEIGHT: f64 = 1.0;

    /// Points per unit weight when a chord root is in the key's scale.
    pub const ROOT_IN_SCALE_POINTS: f64 = 2.0;

    /// Per-chord score ceiling used to normalize confidence.
    pub const MAX_POINTS_PER_CHORD: f64 = 5.0;

    /// Upper bound of the confidence percentage.
    pub const MAX_CONFIDENCE: f64 = 100.0;
}

/// Song library constants.
pub mod library {
    /// File extension of chord sheet files.
    pub const SONG_EXTENSION: &str = "txt";

    /// Default library directory, relative to the home directory.
    pub const DEFAULT_DIR: &str = "Documents/Songs";

    /// Minimum fuzzy score for a title lookup to count as a match.
    pub const MIN_FUZZY_SCORE: i64 = 80;
}
