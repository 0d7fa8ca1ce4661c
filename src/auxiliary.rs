//! Closed-set lexicons consulted during tokenization.
//!
//! Particles (josa), endings (eomi), prefixes, suffixes, abbreviation
//! expansions, forced decompositions, Sino-Korean alternate forms, and the
//! per-syllable feature table. Built once from their line sources and
//! immutable afterwards; the store shares one instance across readers.

use crate::error::Result;
use crate::source::{DictFile, LineSource};
use crate::utils::normalize;
use crate::word::{parse_uncompound_line, WordEntry};
use ahash::AHashMap;
use tracing::debug;

/// First codepoint of the Unicode Hangul syllable block, row 0 of the
/// syllable-feature table.
pub const HANGUL_SYLLABLE_BASE: char = '가';

/// The immutable auxiliary lexicon set.
#[derive(Debug, Default)]
pub struct AuxiliaryLexicons {
    josas: AHashMap<String, String>,
    eomis: AHashMap<String, String>,
    prefixes: AHashMap<String, String>,
    suffixes: AHashMap<String, String>,
    abbreviations: AHashMap<String, String>,
    uncompounds: AHashMap<String, WordEntry>,
    cjwords: AHashMap<String, String>,
    syllables: Vec<Vec<char>>,
}

impl AuxiliaryLexicons {
    /// Load every auxiliary source. Any unreadable source fails the whole
    /// load; nothing partially built escapes.
    pub fn load<S: LineSource>(source: &S) -> Result<Self> {
        let josas = read_keyed(source, DictFile::Josa)?;
        let eomis = read_keyed(source, DictFile::Eomi)?;
        let prefixes = read_keyed(source, DictFile::Prefix)?;
        let suffixes = read_keyed(source, DictFile::Suffix)?;
        let abbreviations = read_colon_map(source, DictFile::Abbreviation)?;
        let cjwords = read_colon_map(source, DictFile::CjWord)?;

        let mut uncompounds = AHashMap::new();
        for line in source.read_lines(DictFile::Uncompounds)? {
            if let Some(entry) = parse_uncompound_line(&line) {
                uncompounds.insert(entry.text().to_owned(), entry);
            }
        }

        // One row per syllable in codepoint order; the first line is a header.
        let syllables: Vec<Vec<char>> = source
            .read_lines(DictFile::SyllableFeature)?
            .into_iter()
            .skip(1)
            .map(|line| line.chars().collect())
            .collect();
        debug!(
            josas = josas.len(),
            eomis = eomis.len(),
            uncompounds = uncompounds.len(),
            syllables = syllables.len(),
            "auxiliary lexicons built"
        );

        Ok(Self {
            josas,
            eomis,
            prefixes,
            suffixes,
            abbreviations,
            uncompounds,
            cjwords,
            syllables,
        })
    }

    pub fn has_josa(&self, text: &str) -> bool {
        self.josas.contains_key(text)
    }

    pub fn josa(&self, text: &str) -> Option<&str> {
        self.josas.get(text).map(String::as_str)
    }

    pub fn has_eomi(&self, text: &str) -> bool {
        self.eomis.contains_key(text)
    }

    pub fn eomi(&self, text: &str) -> Option<&str> {
        self.eomis.get(text).map(String::as_str)
    }

    pub fn has_prefix(&self, text: &str) -> bool {
        self.prefixes.contains_key(text)
    }

    pub fn has_suffix(&self, text: &str) -> bool {
        self.suffixes.contains_key(text)
    }

    /// Canonical expansion of an abbreviation, if known.
    pub fn abbreviation(&self, text: &str) -> Option<&str> {
        self.abbreviations.get(text).map(String::as_str)
    }

    /// Forced decomposition for an exception word.
    pub fn uncompound(&self, text: &str) -> Option<&WordEntry> {
        self.uncompounds.get(text)
    }

    /// Sino-Korean alternate form.
    pub fn cj_word(&self, text: &str) -> Option<&str> {
        self.cjwords.get(text).map(String::as_str)
    }

    /// Number of syllable-feature rows.
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    /// Feature row for the syllable at `idx` (codepoint offset from
    /// [`HANGUL_SYLLABLE_BASE`]). Out-of-range indices clamp to the last
    /// row, the one for the final syllable of the Hangul block.
    pub fn syllable_feature(&self, idx: isize) -> &[char] {
        if self.syllables.is_empty() {
            return &[];
        }
        let last = self.syllables.len() - 1;
        let clamped = if idx < 0 || idx as usize > last {
            last
        } else {
            idx as usize
        };
        &self.syllables[clamped]
    }

    /// Feature row for a character, indexing from [`HANGUL_SYLLABLE_BASE`].
    /// Non-syllable characters fall outside the table and clamp like any
    /// out-of-range index.
    pub fn syllable_feature_of(&self, ch: char) -> &[char] {
        self.syllable_feature(ch as isize - HANGUL_SYLLABLE_BASE as isize)
    }

    /// Combine a trailing consonant jamo with a candidate ending and check
    /// whether the result is a known ending.
    ///
    /// ㄴ/ㄹ/ㅁ/ㅂ prepend their neutral syllables 은/을/음/습; any other
    /// character is prepended literally. Returns the combined ending only if
    /// the endings lexicon contains it.
    pub fn combine_ending(&self, jamo: char, ending: &str) -> Option<String> {
        let combined = match jamo {
            'ㄴ' => format!("은{ending}"),
            'ㄹ' => format!("을{ending}"),
            'ㅁ' => format!("음{ending}"),
            'ㅂ' => format!("습{ending}"),
            other => format!("{other}{ending}"),
        };
        if self.has_eomi(&combined) {
            Some(combined)
        } else {
            None
        }
    }
}

/// Read a header-first source whose lines are either `KEY,VALUE` or a bare
/// token doubling as both key and value.
fn read_keyed<S: LineSource>(source: &S, file: DictFile) -> Result<AHashMap<String, String>> {
    let mut map = AHashMap::new();
    for line in source.read_lines(file)?.into_iter().skip(1) {
        let trimmed = normalize(&line);
        if trimmed.is_empty() {
            continue;
        }
        // Trailing separators contribute no fields, so "는," is a bare token,
        // not a key with an empty normalized form.
        let mut fields: Vec<&str> = trimmed.split(',').collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        if fields.len() == 2 {
            map.insert(normalize(fields[0]), normalize(fields[1]));
        } else {
            map.insert(trimmed.clone(), trimmed);
        }
    }
    Ok(map)
}

/// Read a `KEY:VALUE` source (abbreviations, Sino-Korean forms). Lines with
/// any other field count are skipped.
fn read_colon_map<S: LineSource>(source: &S, file: DictFile) -> Result<AHashMap<String, String>> {
    let mut map = AHashMap::new();
    for line in source.read_lines(file)? {
        let fields: Vec<&str> = line.split(':').filter(|f| !f.trim().is_empty()).collect();
        if fields.len() != 2 {
            continue;
        }
        map.insert(normalize(fields[0]), normalize(fields[1]));
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryLineSource;

    fn sample_source() -> MemoryLineSource {
        let mut source = MemoryLineSource::with_empty_sources();
        source
            .set(DictFile::Josa, ["!JOSA", "는", "를,를"])
            .set(DictFile::Eomi, ["!EOMI", "다", "은다", "습니다"])
            .set(DictFile::Prefix, ["!PREFIX", "불"])
            .set(DictFile::Suffix, ["!SUFFIX", "님"])
            .set(DictFile::Abbreviation, ["셤:시험", "겜:게임"])
            .set(DictFile::CjWord, ["학교:學校"])
            .set(DictFile::Uncompounds, ["고속도로:고속,도로"])
            .set(
                DictFile::SyllableFeature,
                ["!HEADER", "10000", "01000", "00111"],
            );
        source
    }

    #[test]
    fn keyed_sources_skip_header_and_accept_both_shapes() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        assert!(!aux.has_josa("!JOSA"));
        assert!(aux.has_josa("는"));
        assert_eq!(aux.josa("를"), Some("를"));
        assert_eq!(aux.josa("가"), None);
        assert!(aux.has_prefix("불"));
        assert!(aux.has_suffix("님"));
        assert!(!aux.has_suffix("불"));
    }

    #[test]
    fn trailing_comma_lines_take_the_bare_token_path() {
        let mut source = sample_source();
        source.set(DictFile::Josa, ["!JOSA", "는,"]);
        let aux = AuxiliaryLexicons::load(&source).unwrap();
        assert!(aux.has_josa("는,"));
        assert_eq!(aux.josa("는,"), Some("는,"));
        assert!(!aux.has_josa("는"));
    }

    #[test]
    fn colon_sources() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        assert_eq!(aux.abbreviation("셤"), Some("시험"));
        assert_eq!(aux.cj_word("학교"), Some("學校"));
        assert_eq!(aux.cj_word("學校"), None);
    }

    #[test]
    fn uncompound_entries_carry_decomposition() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        let entry = aux.uncompound("고속도로").unwrap();
        assert_eq!(entry.compounds().len(), 2);
        assert_eq!(entry.compounds()[0].text, "고속");
        assert!(aux.uncompound("서울").is_none());
    }

    #[test]
    fn syllable_features_clamp_out_of_range() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        assert_eq!(aux.syllable_count(), 3);
        assert_eq!(aux.syllable_feature(0), ['1', '0', '0', '0', '0']);
        assert_eq!(aux.syllable_feature(2), ['0', '0', '1', '1', '1']);
        // Both directions clamp to the last row.
        assert_eq!(aux.syllable_feature(-1), aux.syllable_feature(2));
        assert_eq!(aux.syllable_feature(99), aux.syllable_feature(2));
    }

    #[test]
    fn syllable_feature_of_offsets_from_base() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        assert_eq!(aux.syllable_feature_of('가'), aux.syllable_feature(0));
        assert_eq!(aux.syllable_feature_of('각'), aux.syllable_feature(1));
        // Latin letters sit below the block and clamp.
        assert_eq!(aux.syllable_feature_of('a'), aux.syllable_feature(2));
    }

    #[test]
    fn combine_ending_rules() {
        let aux = AuxiliaryLexicons::load(&sample_source()).unwrap();
        assert_eq!(aux.combine_ending('ㄴ', "다"), Some("은다".to_owned()));
        assert_eq!(aux.combine_ending('ㅂ', "니다"), Some("습니다".to_owned()));
        // 을다/음다 are not registered endings.
        assert_eq!(aux.combine_ending('ㄹ', "다"), None);
        assert_eq!(aux.combine_ending('ㅁ', "다"), None);
        // Other characters are prepended literally.
        assert_eq!(aux.combine_ending('은', "다"), Some("은다".to_owned()));
        assert_eq!(aux.combine_ending('하', "다"), None);
    }

    #[test]
    fn unreadable_source_fails_whole_load() {
        let mut source = sample_source();
        source.set(DictFile::Eomi, ["!EOMI"]);
        // Removing a source entirely must abort the load.
        let missing = MemoryLineSource::new();
        assert!(AuxiliaryLexicons::load(&missing).is_err());
        // A present-but-header-only source is fine, just empty.
        let aux = AuxiliaryLexicons::load(&source).unwrap();
        assert!(!aux.has_eomi("다"));
    }
}
