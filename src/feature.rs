//! Fixed-width grammatical feature codes.
//!
//! Every dictionary entry carries a tag string such as `100000000X` in which
//! each position is a flag: noun, verb, adverb, "do"-verb, copula, and so on,
//! ending with the irregular-conjugation class character (`X` = regular).
//! Legacy dictionaries used a shorter 6-character form; those are widened at
//! parse time so both forms decode identically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the noun flag (`'1'` plain noun, `'2'` noun that allows
/// further compounding).
pub const IDX_NOUN: usize = 0;
/// Position of the verb flag.
pub const IDX_VERB: usize = 1;
/// Position of the adverb (busa) flag.
pub const IDX_BUSA: usize = 2;
/// Position of the "do"-verb (하다) flag.
pub const IDX_DOV: usize = 3;
/// Position of the copula ("be"-verb, 이다) flag.
pub const IDX_BEV: usize = 4;
/// Position of the irregular-conjugation class character.
pub const IDX_IRREGULAR: usize = 9;

/// Where the zero-fill goes when widening a legacy 6-character code.
const LEGACY_FILL_AT: usize = 5;
/// Legacy codes are exactly this long before widening.
const LEGACY_LEN: usize = 6;

/// A parsed feature code.
///
/// Positions outside the stored width read as `'0'`, so a widened legacy
/// code and a full-width code with the same flags behave the same.
///
/// # Example
/// ```
/// use libkorean_lexicon::feature::FeatureCode;
///
/// let code = FeatureCode::parse("100000000X");
/// assert!(code.is_plain_noun());
/// assert!(!code.is_verb());
/// assert_eq!(code.irregular_class(), 'X');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCode {
    flags: Vec<char>,
}

impl FeatureCode {
    /// Parse a raw code field, trimming surrounding whitespace and widening
    /// legacy 6-character codes by inserting `000` at position 5.
    ///
    /// ```
    /// use libkorean_lexicon::feature::FeatureCode;
    ///
    /// let legacy = FeatureCode::parse("10001X");
    /// let full = FeatureCode::parse("10001000X");
    /// assert_eq!(legacy, full);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut flags: Vec<char> = raw.trim().chars().collect();
        if flags.len() == LEGACY_LEN {
            flags.splice(LEGACY_FILL_AT..LEGACY_FILL_AT, ['0', '0', '0']);
        }
        Self { flags }
    }

    /// The flag character at `idx`, or `'0'` when out of range.
    pub fn flag(&self, idx: usize) -> char {
        self.flags.get(idx).copied().unwrap_or('0')
    }

    /// Number of stored flag positions.
    pub fn width(&self) -> usize {
        self.flags.len()
    }

    /// Plain noun (`'1'` at the noun position).
    pub fn is_plain_noun(&self) -> bool {
        self.flag(IDX_NOUN) == '1'
    }

    /// Noun that allows further compounding (`'2'`).
    pub fn is_compoundable_noun(&self) -> bool {
        self.flag(IDX_NOUN) == '2'
    }

    /// Plain or compoundable noun.
    pub fn is_noun(&self) -> bool {
        self.is_plain_noun() || self.is_compoundable_noun()
    }

    pub fn is_verb(&self) -> bool {
        self.flag(IDX_VERB) == '1'
    }

    /// Adverb, "busa" in the tag vocabulary.
    pub fn is_adverb(&self) -> bool {
        self.flag(IDX_BUSA) == '1'
    }

    /// Verb formed with 하다 ("do").
    pub fn is_do_verb(&self) -> bool {
        self.flag(IDX_DOV) == '1'
    }

    /// Copula 이다 ("be").
    pub fn is_be_verb(&self) -> bool {
        self.flag(IDX_BEV) == '1'
    }

    /// The irregular-conjugation class character (`'X'` means regular,
    /// `'0'` when the code is too short to carry one).
    pub fn irregular_class(&self) -> char {
        self.flag(IDX_IRREGULAR)
    }
}

impl fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.flags {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_width_code() {
        let code = FeatureCode::parse("100000000X");
        assert_eq!(code.width(), 10);
        assert!(code.is_plain_noun());
        assert!(code.is_noun());
        assert!(!code.is_compoundable_noun());
        assert_eq!(code.irregular_class(), 'X');
    }

    #[test]
    fn legacy_code_normalizes_to_same_flags() {
        let legacy = FeatureCode::parse("90000X");
        let widened = FeatureCode::parse("90000000X");
        assert_eq!(legacy, widened);
        assert_eq!(legacy.width(), 9);
        assert_eq!(legacy.flag(8), 'X');
        for idx in 0..5 {
            assert_eq!(legacy.flag(idx), widened.flag(idx));
        }
    }

    #[test]
    fn trims_raw_field() {
        let code = FeatureCode::parse(" 110000000X ");
        assert!(code.is_plain_noun());
        assert!(code.is_verb());
    }

    #[test]
    fn compoundable_noun_flag() {
        let code = FeatureCode::parse("200000000X");
        assert!(code.is_compoundable_noun());
        assert!(code.is_noun());
        assert!(!code.is_plain_noun());
    }

    #[test]
    fn verb_flags() {
        let code = FeatureCode::parse("010110000B");
        assert!(code.is_verb());
        assert!(code.is_do_verb());
        assert!(code.is_be_verb());
        assert!(!code.is_adverb());
        assert_eq!(code.irregular_class(), 'B');
    }

    #[test]
    fn out_of_range_reads_zero() {
        let code = FeatureCode::parse("1");
        assert_eq!(code.flag(9), '0');
        assert_eq!(code.irregular_class(), '0');
    }

    #[test]
    fn display_round_trips() {
        let code = FeatureCode::parse("200000000X");
        assert_eq!(code.to_string(), "200000000X");
    }
}
