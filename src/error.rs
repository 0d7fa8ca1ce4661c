//! Error type for lexicon loading.
//!
//! All failures surfaced by this crate stem from reading a line source during
//! `initialize`/`load`; malformed individual lines inside a readable source
//! are skipped, never errored.

use std::io;

/// Crate-wide result type, defaulting to [`LoadError`].
pub type Result<T, E = LoadError> = std::result::Result<T, E>;

/// A line source could not be read, or an auxiliary lexicon could not be
/// built from it.
///
/// Raised only by [`LexiconStore::initialize`](crate::LexiconStore::initialize)
/// and [`LexiconStore::load`](crate::LexiconStore::load) (and the query
/// methods that bootstrap lazily through them).
#[derive(Debug, thiserror::Error)]
#[error("lexicon load failed: {msg}")]
pub struct LoadError {
    msg: String,
    #[source]
    cause: Option<io::Error>,
}

impl LoadError {
    /// Build an error with a plain message.
    pub fn new<S: Into<String>>(msg: S) -> Self {
        Self {
            msg: msg.into(),
            cause: None,
        }
    }

    /// Build an error wrapping an I/O failure.
    pub fn io<S: Into<String>>(msg: S, cause: io::Error) -> Self {
        Self {
            msg: msg.into(),
            cause: Some(cause),
        }
    }

    /// The human-readable description of what failed.
    pub fn message(&self) -> &str {
        &self.msg
    }
}
