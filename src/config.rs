//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::library::DEFAULT_DIR;
use crate::error::{Error, Result};
use crate::key::StrategyKind;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory containing chord sheet .txt files
    pub song_library_path: Option<PathBuf>,
    /// Key detection strategy used when songs are ingested
    pub key_strategy: StrategyKind,
    /// Semitones to transpose by when rendering, unless overridden
    pub default_transpose: i32,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            song_library_path: None,
            key_strategy: StrategyKind::default(),
            default_transpose: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(strategy) = lookup("KEY_STRATEGY") {
            config.key_strategy = strategy.parse()?;
        }

        if let Some(transpose) = lookup("DEFAULT_TRANSPOSE") {
            config.default_transpose = transpose.trim().parse::<i32>().map_err(|_| {
                Error::config(
                    format!("DEFAULT_TRANSPOSE '{transpose}' is not a whole number"),
                    "Use a semitone offset such as -2 or 3",
                )
            })?;
        }

        // Library path: env var override, or default ~/Documents/Songs/
        config.song_library_path = lookup("SONG_LIBRARY_PATH").map_or_else(
            || {
                dirs::home_dir()
                    .map(|h| h.join(DEFAULT_DIR))
                    .filter(|p| p.is_dir())
            },
            |path| {
                let p = PathBuf::from(shellexpand::tilde(&path).to_string());
                p.is_dir().then_some(p)
            },
        );

        Ok(config)
    }

    /// Check if a song library directory is available
    pub const fn has_song_library(&self) -> bool {
        self.song_library_path.is_some()
    }
}
