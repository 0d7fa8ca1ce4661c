//! Line sources: where raw dictionary lines come from.
//!
//! The store never touches files directly; it asks a [`LineSource`] for the
//! lines of one [`DictFile`] at a time. [`FsLineSource`] reads the paths in a
//! [`LexiconConfig`]; [`MemoryLineSource`] serves fixed lines for tests and
//! embedded dictionaries.

use crate::config::LexiconConfig;
use crate::error::{LoadError, Result};
use ahash::AHashMap;
use tracing::debug;

/// The individual flat-file sources a lexicon is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictFile {
    /// Primary word dictionary (`TEXT,CODE` lines).
    Dictionary,
    /// Site-local word extensions, same shape as [`DictFile::Dictionary`].
    Extension,
    /// Compound decompositions (`TEXT:PARTS[:SUFFIX]`).
    Compounds,
    /// Particles, header line first.
    Josa,
    /// Verb/adjective endings, header line first.
    Eomi,
    Prefix,
    Suffix,
    /// Abbreviation expansions (`KEY:VALUE`).
    Abbreviation,
    /// Exception words forced to decompose (`TEXT:PARTS`).
    Uncompounds,
    /// Sino-Korean alternate forms (`KEY:VALUE`).
    CjWord,
    /// Per-syllable feature rows, header line first.
    SyllableFeature,
}

/// Supplier of raw dictionary lines, one source kind at a time.
///
/// Implementations report unreadable sources through [`LoadError`];
/// interpreting the lines (including skipping malformed ones) is the
/// caller's business.
pub trait LineSource {
    fn read_lines(&self, file: DictFile) -> Result<Vec<String>>;
}

/// Reads each source from the path configured in a [`LexiconConfig`].
#[derive(Debug, Clone)]
pub struct FsLineSource {
    config: LexiconConfig,
}

impl FsLineSource {
    pub fn new(config: LexiconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }
}

impl LineSource for FsLineSource {
    fn read_lines(&self, file: DictFile) -> Result<Vec<String>> {
        let path = self.config.path_for(file);
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoadError::io(format!("read {:?} from {}", file, path.display()), e))?;
        let lines: Vec<String> = content.lines().map(str::to_owned).collect();
        debug!(source = ?file, path = %path.display(), lines = lines.len(), "read line source");
        Ok(lines)
    }
}

/// Serves lines registered up front; asking for an unregistered source fails
/// like a missing file would.
///
/// # Example
/// ```
/// use libkorean_lexicon::source::{DictFile, LineSource, MemoryLineSource};
///
/// let mut source = MemoryLineSource::new();
/// source.set(DictFile::Dictionary, ["강남,100000000X"]);
/// assert_eq!(source.read_lines(DictFile::Dictionary).unwrap().len(), 1);
/// assert!(source.read_lines(DictFile::Josa).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: AHashMap<DictFile, Vec<String>>,
}

impl MemoryLineSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the lines for one source.
    pub fn set<I, S>(&mut self, file: DictFile, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines
            .insert(file, lines.into_iter().map(Into::into).collect());
        self
    }

    /// Register every source kind as present but empty, then override the
    /// interesting ones with [`set`](MemoryLineSource::set). Convenient for
    /// tests that only care about a couple of sources.
    pub fn with_empty_sources() -> Self {
        let mut source = Self::new();
        for file in [
            DictFile::Dictionary,
            DictFile::Extension,
            DictFile::Compounds,
            DictFile::Josa,
            DictFile::Eomi,
            DictFile::Prefix,
            DictFile::Suffix,
            DictFile::Abbreviation,
            DictFile::Uncompounds,
            DictFile::CjWord,
            DictFile::SyllableFeature,
        ] {
            source.set(file, Vec::<String>::new());
        }
        source
    }
}

impl LineSource for MemoryLineSource {
    fn read_lines(&self, file: DictFile) -> Result<Vec<String>> {
        self.lines
            .get(&file)
            .cloned()
            .ok_or_else(|| LoadError::new(format!("no lines registered for {file:?}")))
    }
}
