//! Error types for PortfolioBuilder.
//!
//! Library crates use [`PortfolioBuilderError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.
//!
//! Wizard boundary conditions are deliberately *not* errors: they are
//! absorbed as no-ops (see [`crate::Outcome`]).

use std::path::PathBuf;

/// Top-level error type for all PortfolioBuilder operations.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioBuilderError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Profile file could not be parsed or replayed.
    #[error("profile error: {message}")]
    Profile { message: String },

    /// An id that does not exist in one of the static catalogs.
    #[error("unknown {kind} '{id}'")]
    UnknownCatalogEntry { kind: &'static str, id: String },

    /// The publish pipeline could not deliver its result.
    #[error("pipeline failure: {0}")]
    Pipeline(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, invalid receipt, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PortfolioBuilderError>;

impl PortfolioBuilderError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a profile error from any displayable message.
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Report an id missing from a catalog table.
    pub fn unknown(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownCatalogEntry {
            kind,
            id: id.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PortfolioBuilderError::config("bad tick");
        assert_eq!(err.to_string(), "config error: bad tick");

        let err = PortfolioBuilderError::unknown("publish target", "heroku");
        assert_eq!(err.to_string(), "unknown publish target 'heroku'");

        let err = PortfolioBuilderError::Pipeline("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }
}
