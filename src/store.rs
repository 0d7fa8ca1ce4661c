//! The lexicon store: lazy bootstrap, atomic reload, and the query surface.
//!
//! Two-phase lifecycle. `initialize` loads the auxiliary lexicons once;
//! `load` builds the word trie from the dictionary, extension and compounds
//! sources and publishes it as an immutable snapshot. Both transitions are
//! double-checked behind one bootstrap mutex, so the first caller pays the
//! load cost and every later caller sees the cached result.
//!
//! Readers clone the current snapshot `Arc` and query it without holding any
//! lock; `load` swaps the `Arc` wholesale, so a reader observes either the
//! complete old trie or the complete new one, never a partial build. The
//! `add_*`/`clear_words` mutators are the second, explicitly single-writer
//! mode: they edit the live snapshot copy-on-write instead of rebuilding.

use crate::auxiliary::AuxiliaryLexicons;
use crate::error::{LoadError, Result};
use crate::source::{DictFile, LineSource};
use crate::trie::PrefixTrie;
use crate::word::{parse_compound_line, parse_word_line, WordEntry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;
use tracing::info;

/// Shared, queryable dictionary of word forms plus the auxiliary closed-set
/// lexicons.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
///
/// # Example
/// ```
/// use libkorean_lexicon::source::{DictFile, MemoryLineSource};
/// use libkorean_lexicon::LexiconStore;
///
/// let mut source = MemoryLineSource::with_empty_sources();
/// source.set(DictFile::Dictionary, ["강남,100000000X"]);
///
/// let store = LexiconStore::new(source);
/// assert!(store.get_word("강남").is_some());
/// assert!(store.get_word("서울").is_none());
/// ```
#[derive(Debug)]
pub struct LexiconStore<S> {
    source: S,
    /// Serializes the `initialize`/`load` transitions.
    bootstrap: Mutex<()>,
    initialized: AtomicBool,
    prepared: AtomicBool,
    auxiliary: RwLock<Option<Arc<AuxiliaryLexicons>>>,
    words: RwLock<Arc<PrefixTrie<WordEntry>>>,
}

impl<S: LineSource> LexiconStore<S> {
    /// Create a store over `source`. Nothing is read until the first
    /// `initialize`/`load` or the first query.
    pub fn new(source: S) -> Self {
        Self {
            source,
            bootstrap: Mutex::new(()),
            initialized: AtomicBool::new(false),
            prepared: AtomicBool::new(false),
            auxiliary: RwLock::new(None),
            words: RwLock::new(Arc::new(PrefixTrie::new())),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the auxiliary lexicons. Idempotent; runs the actual load at most
    /// once. On failure nothing is published and the next call retries.
    pub fn initialize(&self) -> Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        let _guard = self.bootstrap.lock().unwrap_or_else(PoisonError::into_inner);
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }

        let start = Instant::now();
        let aux = AuxiliaryLexicons::load(&self.source)?;
        *self
            .auxiliary
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(aux));
        self.initialized.store(true, Ordering::Release);
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "auxiliary lexicons loaded"
        );
        Ok(())
    }

    /// Build the word trie from the dictionary, extension and compounds
    /// sources and publish it atomically.
    ///
    /// With `reload == false` this is a no-op when a trie is already
    /// published. With `reload == true` a brand-new trie always replaces the
    /// current snapshot; concurrent readers keep the old snapshot until the
    /// swap and the new one afterwards.
    pub fn load(&self, reload: bool) -> Result<()> {
        self.initialize()?;
        let _guard = self.bootstrap.lock().unwrap_or_else(PoisonError::into_inner);
        if !reload && self.prepared.load(Ordering::Acquire) {
            return Ok(());
        }

        let start = Instant::now();
        let mut trie = PrefixTrie::new();
        let mut lines = self.source.read_lines(DictFile::Dictionary)?;
        lines.extend(self.source.read_lines(DictFile::Extension)?);
        load_word_lines(&mut trie, lines.iter());
        load_compound_lines(&mut trie, self.source.read_lines(DictFile::Compounds)?.iter());

        let entries = trie.len();
        self.publish(trie);
        info!(
            entries,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "word dictionary loaded"
        );
        Ok(())
    }

    /// Force a full rebuild; shorthand for `load(true)`.
    pub fn reload(&self) -> Result<()> {
        self.load(true)
    }

    /// Prepare the store with the auxiliary lexicons only and an empty word
    /// trie. Queries will not trigger a dictionary load afterwards; useful
    /// for test isolation and empty-dictionary scenarios.
    pub fn prepare_empty(&self) -> Result<()> {
        self.initialize()?;
        let _guard = self.bootstrap.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(PrefixTrie::new());
        Ok(())
    }

    /// Lazy bootstrap: run `initialize` and then `load(false)` if either has
    /// not happened yet. Every query funnels through here.
    pub fn ensure_prepared(&self) -> Result<()> {
        if !self.initialized.load(Ordering::Acquire) {
            self.initialize()?;
        }
        if !self.prepared.load(Ordering::Acquire) {
            self.load(false)?;
        }
        Ok(())
    }

    /// Whether a word trie snapshot has been published.
    pub fn is_prepared(&self) -> bool {
        self.prepared.load(Ordering::Acquire)
    }

    fn publish(&self, trie: PrefixTrie<WordEntry>) {
        *self.words.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(trie);
        self.prepared.store(true, Ordering::Release);
    }

    /// Clone the current snapshot reference.
    fn current(&self) -> Arc<PrefixTrie<WordEntry>> {
        Arc::clone(&self.words.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Snapshot accessor for the non-throwing query methods. A missing
    /// lexicon is a configuration fault, not a lookup miss, so a failed lazy
    /// load panics here instead of masquerading as "absent".
    fn current_prepared(&self) -> Arc<PrefixTrie<WordEntry>> {
        if let Err(e) = self.ensure_prepared() {
            panic!("word dictionary could not be loaded: {e}");
        }
        self.current()
    }

    fn aux(&self) -> Result<Arc<AuxiliaryLexicons>> {
        self.initialize()?;
        let guard = self.auxiliary.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(aux) => Ok(Arc::clone(aux)),
            None => Err(LoadError::new("auxiliary lexicons not published")),
        }
    }

    // ========== Word queries ==========

    /// Exact dictionary lookup. Triggers the lazy bootstrap; panics if the
    /// sources cannot be loaded (see [`LoadError`] semantics).
    pub fn get_word(&self, key: &str) -> Option<WordEntry> {
        let snapshot = self.current_prepared();
        if key.is_empty() {
            return None;
        }
        snapshot.get(key).cloned()
    }

    /// Plain noun only.
    pub fn get_noun(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key)
            .filter(|e| e.feature().is_plain_noun())
    }

    /// Plain or compoundable noun.
    pub fn get_all_noun(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key).filter(|e| e.feature().is_noun())
    }

    pub fn get_verb(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key).filter(|e| e.feature().is_verb())
    }

    pub fn get_adverb(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key).filter(|e| e.feature().is_adverb())
    }

    pub fn get_be_verb(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key).filter(|e| e.feature().is_be_verb())
    }

    pub fn get_do_verb(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key).filter(|e| e.feature().is_do_verb())
    }

    /// Verb with the given irregular-conjugation class.
    pub fn get_irregular_verb(&self, key: &str, irregular_class: char) -> Option<WordEntry> {
        self.get_word(key).filter(|e| {
            e.feature().is_verb() && e.feature().irregular_class() == irregular_class
        })
    }

    /// Noun (plain or compoundable) or adverb; anything but a verb.
    pub fn get_word_except_verb(&self, key: &str) -> Option<WordEntry> {
        self.get_word(key)
            .filter(|e| e.feature().is_noun() || e.feature().is_adverb())
    }

    /// Every entry whose surface form starts with `prefix`.
    pub fn find_with_prefix(&self, prefix: &str) -> Result<Vec<WordEntry>> {
        self.ensure_prepared()?;
        Ok(self.current().prefixed_by(prefix).cloned().collect())
    }

    // ========== In-place mutation (single-writer mode) ==========
    //
    // These bypass the build-then-swap protocol and edit the live snapshot.
    // They are for controlled single-writer scenarios (test setup,
    // administrative patching); readers that already cloned the snapshot keep
    // seeing the pre-mutation view.

    /// Insert one entry into the live snapshot, overwriting any entry under
    /// the same surface form. Marks the store prepared, so later queries do
    /// not kick off a source load.
    pub fn add_entry(&self, entry: WordEntry) {
        self.mutate(|trie| {
            trie.insert(entry.text().to_owned(), entry);
        });
    }

    /// Parse and insert one `TEXT,CODE` word line; malformed lines are
    /// silently ignored.
    pub fn add_word(&self, line: &str) {
        self.add_words([line]);
    }

    /// Parse and insert `TEXT,CODE` word lines.
    pub fn add_words<I, T>(&self, lines: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.mutate(|trie| load_word_lines(trie, lines));
    }

    /// Parse and insert `TEXT:PARTS[:SUFFIX]` compound lines.
    pub fn add_compounds<I, T>(&self, lines: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.mutate(|trie| load_compound_lines(trie, lines));
    }

    /// Drop every word entry from the live snapshot. The prepared flag is
    /// left as-is: a cleared store stays cleared rather than reloading from
    /// the sources on the next query.
    pub fn clear_words(&self) {
        let _guard = self.bootstrap.lock().unwrap_or_else(PoisonError::into_inner);
        let mut words = self.words.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut words).clear();
    }

    fn mutate(&self, edit: impl FnOnce(&mut PrefixTrie<WordEntry>)) {
        let _guard = self.bootstrap.lock().unwrap_or_else(PoisonError::into_inner);
        let mut words = self.words.write().unwrap_or_else(PoisonError::into_inner);
        edit(Arc::make_mut(&mut words));
        self.prepared.store(true, Ordering::Release);
    }

    // ========== Auxiliary lexicon queries ==========

    pub fn exists_josa(&self, text: &str) -> Result<bool> {
        Ok(self.aux()?.has_josa(text))
    }

    pub fn get_josa(&self, text: &str) -> Result<Option<String>> {
        Ok(self.aux()?.josa(text).map(str::to_owned))
    }

    pub fn exists_eomi(&self, text: &str) -> Result<bool> {
        Ok(self.aux()?.has_eomi(text))
    }

    pub fn get_eomi(&self, text: &str) -> Result<Option<String>> {
        Ok(self.aux()?.eomi(text).map(str::to_owned))
    }

    pub fn exists_prefix(&self, text: &str) -> Result<bool> {
        Ok(self.aux()?.has_prefix(text))
    }

    pub fn exists_suffix(&self, text: &str) -> Result<bool> {
        Ok(self.aux()?.has_suffix(text))
    }

    pub fn get_abbreviation(&self, key: &str) -> Result<Option<String>> {
        Ok(self.aux()?.abbreviation(key).map(str::to_owned))
    }

    pub fn get_uncompound(&self, key: &str) -> Result<Option<WordEntry>> {
        Ok(self.aux()?.uncompound(key).cloned())
    }

    pub fn get_cj_word(&self, key: &str) -> Result<Option<String>> {
        Ok(self.aux()?.cj_word(key).map(str::to_owned))
    }

    /// Feature row for the syllable at codepoint offset `idx` from `가`;
    /// out-of-range indices clamp to the final row.
    pub fn get_syllable_feature(&self, idx: isize) -> Result<Vec<char>> {
        Ok(self.aux()?.syllable_feature(idx).to_vec())
    }

    /// Feature row for a character, offset from `가`.
    pub fn get_syllable_feature_of(&self, ch: char) -> Result<Vec<char>> {
        Ok(self.aux()?.syllable_feature_of(ch).to_vec())
    }

    /// Combine a trailing consonant jamo (ㄴ/ㄹ/ㅁ/ㅂ → 은/을/음/습) with a
    /// candidate ending and return the combination iff it is a known ending.
    pub fn combine_and_check_ending(&self, jamo: char, ending: &str) -> Result<Option<String>> {
        Ok(self.aux()?.combine_ending(jamo, ending))
    }
}

/// Insert every well-formed `TEXT,CODE` line; malformed lines are skipped.
fn load_word_lines<I, T>(trie: &mut PrefixTrie<WordEntry>, lines: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    for line in lines {
        if let Some(entry) = parse_word_line(line.as_ref()) {
            trie.insert(entry.text().to_owned(), entry);
        }
    }
}

/// Insert every well-formed compound line; malformed lines are skipped.
fn load_compound_lines<I, T>(trie: &mut PrefixTrie<WordEntry>, lines: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    for line in lines {
        if let Some(entry) = parse_compound_line(line.as_ref()) {
            trie.insert(entry.text().to_owned(), entry);
        }
    }
}
