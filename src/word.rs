//! Dictionary entries and the flat line formats they are parsed from.
//!
//! Three line shapes feed the word trie and the uncompound table:
//!
//! - word lines `TEXT,CODE` (dictionary and extension sources),
//! - compound lines `TEXT:PART1,PART2,...[:SUFFIX]`,
//! - uncompound lines `TEXT:PART1,PART2,...` (forced decompositions).
//!
//! Parsing is deliberately tolerant: a line with the wrong field count is
//! skipped (`None`), never an error. Dictionary sources in the wild carry
//! comments, blank lines and stray separators.

use crate::feature::FeatureCode;
use crate::utils::normalize;
use serde::{Deserialize, Serialize};

/// Feature code synthesized for compound lines without a code suffix.
const COMPOUND_CODE: &str = "200000000X";
/// Feature code for uncompound (forced-decomposition) entries, legacy width.
const UNCOMPOUND_CODE: &str = "90000X";

/// One fragment of a compound word's decomposition.
///
/// `offset` is the char index of the first occurrence of `text` inside the
/// comma-joined parts string of the source line, `-1` when the fragment does
/// not occur verbatim. The sentinel is preserved as-is for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundEntry {
    pub text: String,
    pub offset: i32,
}

impl CompoundEntry {
    pub fn new<T: Into<String>>(text: T, offset: i32) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// A dictionary record: surface text, feature code, and (for compounds) the
/// ordered decomposition fragments.
///
/// Entries are immutable once constructed; replacing a word in the trie means
/// inserting a new entry under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    text: String,
    feature: FeatureCode,
    compounds: Vec<CompoundEntry>,
}

impl WordEntry {
    pub fn new<T: Into<String>>(text: T, feature: FeatureCode) -> Self {
        Self {
            text: text.into(),
            feature,
            compounds: Vec::new(),
        }
    }

    pub fn with_compounds(mut self, compounds: Vec<CompoundEntry>) -> Self {
        self.compounds = compounds;
        self
    }

    /// The surface form, also the trie key.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn feature(&self) -> &FeatureCode {
        &self.feature
    }

    /// Decomposition fragments; empty when the word is not a compound.
    pub fn compounds(&self) -> &[CompoundEntry] {
        &self.compounds
    }

    pub fn is_compound(&self) -> bool {
        !self.compounds.is_empty()
    }
}

/// Parse a `TEXT,CODE` word line.
///
/// Splitting on commas (empty fields discarded) must yield exactly two
/// fields; anything else is skipped. The text is NFC-normalized and trimmed,
/// the code widened from the legacy 6-character form when needed.
///
/// ```
/// use libkorean_lexicon::word::parse_word_line;
///
/// let entry = parse_word_line("말한다,100000000X").unwrap();
/// assert_eq!(entry.text(), "말한다");
/// assert!(entry.feature().is_plain_noun());
/// assert!(parse_word_line("말한다").is_none());
/// ```
pub fn parse_word_line(line: &str) -> Option<WordEntry> {
    let fields = split_fields(line, ',');
    if fields.len() != 2 {
        return None;
    }
    let text = normalize(fields[0]);
    if text.is_empty() {
        return None;
    }
    Some(WordEntry::new(text, FeatureCode::parse(fields[1])))
}

/// Parse a `TEXT:PART1,PART2,...[:SUFFIX]` compound line.
///
/// Two fields synthesize the code `200000000X`; three fields synthesize
/// `200<SUFFIX>00X`. Any other field count is skipped. The compound list
/// records each part's first char offset inside the comma-joined parts
/// string.
pub fn parse_compound_line(line: &str) -> Option<WordEntry> {
    let fields = split_fields(line, ':');
    if fields.len() != 2 && fields.len() != 3 {
        return None;
    }
    let code = if fields.len() == 2 {
        FeatureCode::parse(COMPOUND_CODE)
    } else {
        FeatureCode::parse(&format!("200{}00X", fields[2]))
    };
    let text = normalize(fields[0]);
    if text.is_empty() {
        return None;
    }
    Some(WordEntry::new(text, code).with_compounds(compound_entries(fields[1])))
}

/// Parse a `TEXT:PART1,PART2,...` uncompound line (exactly two fields), an
/// exception word that must always decompose. The feature code is the fixed
/// legacy-width exception template.
pub fn parse_uncompound_line(line: &str) -> Option<WordEntry> {
    let fields = split_fields(line, ':');
    if fields.len() != 2 {
        return None;
    }
    let text = normalize(fields[0]);
    if text.is_empty() {
        return None;
    }
    let entry = WordEntry::new(text, FeatureCode::parse(UNCOMPOUND_CODE));
    Some(entry.with_compounds(compound_entries(fields[1])))
}

/// Split a field line on runs of `sep`. A leading separator contributes an
/// empty field (so the line fails the exact-count checks); trailing
/// separators contribute nothing.
fn split_fields(line: &str, sep: char) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(sep).filter(|f| !f.is_empty()).collect();
    if line.starts_with(sep) {
        fields.insert(0, "");
    }
    fields
}

/// Split a comma-joined parts field into [`CompoundEntry`] values, locating
/// each part's first occurrence inside the joined string itself.
fn compound_entries(parts_field: &str) -> Vec<CompoundEntry> {
    parts_field
        .split(',')
        .filter(|p| !p.is_empty())
        .map(|part| CompoundEntry::new(part, char_offset(parts_field, part)))
        .collect()
}

/// First occurrence of `needle` in `haystack`, counted in chars; `-1` when
/// absent.
fn char_offset(haystack: &str, needle: &str) -> i32 {
    match haystack.find(needle) {
        Some(byte_idx) => haystack[..byte_idx].chars().count() as i32,
        None => -1,
    }
}
