//! Application error types.
//!
//! The parsing, transposition and key detection core is total and never fails;
//! these errors come from the edges (configuration, library scanning, file input).

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Song file could not be read as a chord sheet
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Song library error
    #[error("Library error: {0}")]
    Library(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_error_includes_hint() {
        let err = Error::config("KEY_STRATEGY must be 'frequency' or 'scale'", "Unset it to use the default");
        let msg = err.to_string();
        assert!(msg.contains("KEY_STRATEGY"));
        assert!(msg.contains("Unset it"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match Error::io(source, PathBuf::from("/songs/a.txt")) {
            Error::Io { path: Some(p), .. } => assert_eq!(p, PathBuf::from("/songs/a.txt")),
            other => panic!("Expected Io error with path, got {other:?}"),
        }
    }
}
