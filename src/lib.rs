//! libkorean-lexicon
//!
//! The lexicon engine behind a Korean morphological analyzer: a queryable
//! dictionary of word forms tagged with fixed-width feature codes, indexed
//! for exact and prefix lookup, rebuildable at runtime without interrupting
//! readers, plus the closed-set lexicons (particles, endings, prefixes,
//! suffixes, abbreviations, Sino-Korean forms, syllable features) the
//! analyzer consults during tokenization.
//!
//! Public API:
//! - `LexiconStore` - Orchestrator: lazy bootstrap, atomic reload, the full
//!   query/mutation surface
//! - `PrefixTrie` - Generic text-keyed container with prefix enumeration
//! - `WordEntry` / `FeatureCode` / `CompoundEntry` - Dictionary records
//! - `AuxiliaryLexicons` - Immutable closed-set lexicons
//! - `LineSource` / `FsLineSource` / `MemoryLineSource` - Raw line inputs
//! - `LexiconConfig` - Source paths, TOML load/save
//! - `LoadError` - The single load-failure error kind

pub mod error;
pub use error::{LoadError, Result};

pub mod config;
pub use config::LexiconConfig;

pub mod source;
pub use source::{DictFile, FsLineSource, LineSource, MemoryLineSource};

pub mod feature;
pub use feature::FeatureCode;

pub mod word;
pub use word::{CompoundEntry, WordEntry};

pub mod trie;
pub use trie::PrefixTrie;

pub mod auxiliary;
pub use auxiliary::{AuxiliaryLexicons, HANGUL_SYLLABLE_BASE};

pub mod store;
pub use store::LexiconStore;

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    ///
    /// Korean text arrives both precomposed (U+AC00 syllables) and as
    /// conjoining jamo sequences; dictionary keys must unify the two.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}
