//! The lexical store: word → pronunciation and part-of-speech tags.
//!
//! A [`LexicalStore`] owns one immutable [`Corpus`] snapshot at a time. Readers
//! take an `Arc` to the current snapshot and scan it without holding any lock,
//! while [`LexicalStore::replace_all`] swaps in a new snapshot under a write
//! lock. Derived features cached by [`LexicalStore::preload_features`] live
//! inside the snapshot, so replacing the data drops them as well.
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::codec::{Features, Pronunciation};
use crate::error::{LoadError, QueryError};
use crate::pos;
use crate::vfs::Filesystem;

pub mod loader;

use self::loader::RawEntry;

const BUNDLED_NAME: &str = "<bundled>";
const BUNDLED_LEXICON: &str = include_str!("../../data/lexicon.txt");

/// Pronunciation and part-of-speech tags of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalEntry {
    /// raw pronunciation string, see [`crate::codec`]
    pub pronunciation: SmolStr,
    /// part-of-speech tags, most likely first
    pub pos: Vec<SmolStr>,
}

impl LexicalEntry {
    /// Convenience constructor splitting `pos` on whitespace.
    pub fn new(pronunciation: &str, pos: &str) -> LexicalEntry {
        LexicalEntry {
            pronunciation: pronunciation.into(),
            pos: pos.split_whitespace().map(SmolStr::from).collect(),
        }
    }
}

/// One loaded, validated set of entries.
#[derive(Debug)]
pub struct Corpus {
    order: Vec<SmolStr>,
    entries: HashMap<SmolStr, LexicalEntry>,
    addenda_count: usize,
    features: RwLock<HashMap<SmolStr, Arc<Features>>>,
}

impl Corpus {
    fn build(base: Vec<RawEntry>, addenda: Vec<RawEntry>) -> Result<Corpus, LoadError> {
        let addenda_count = addenda.len();
        let mut order = Vec::with_capacity(base.len() + addenda_count);
        let mut entries = HashMap::with_capacity(base.len() + addenda_count);

        for (word, entry) in base.into_iter().chain(addenda) {
            Pronunciation::parse(&word, &entry.pronunciation)?;
            if entries.insert(word.clone(), entry).is_none() {
                order.push(word);
            }
        }

        Ok(Corpus {
            order,
            entries,
            addenda_count,
            features: RwLock::new(HashMap::new()),
        })
    }

    /// The entry for `word`, exact and case-sensitive.
    #[inline]
    pub fn get(&self, word: &str) -> Option<&LexicalEntry> {
        self.entries.get(word)
    }

    #[inline]
    pub(crate) fn pronunciation(&self, word: &str) -> Option<Pronunciation<'_>> {
        self.get(word)
            .map(|e| Pronunciation::trusted(&e.pronunciation))
    }

    /// All words in iteration order.
    #[inline]
    pub fn words(&self) -> &[SmolStr] {
        &self.order
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the corpus holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of entries read from the addenda resource.
    pub fn addenda_count(&self) -> usize {
        self.addenda_count
    }

    /// Derived features of `word`, from the preload cache if populated.
    pub fn features(&self, word: &str) -> Option<Arc<Features>> {
        if let Some(f) = self.features.read().get(word) {
            return Some(Arc::clone(f));
        }

        self.pronunciation(word).map(|p| Arc::new(p.features()))
    }

    fn preload(&self) -> usize {
        let mut cache = self.features.write();
        for (word, entry) in &self.entries {
            if !cache.contains_key(word) {
                let p = Pronunciation::trusted(&entry.pronunciation);
                cache.insert(word.clone(), Arc::new(p.features()));
            }
        }
        cache.len()
    }

    pub(crate) fn has_primary_pos(&self, word: &str, tag: &str) -> bool {
        self.get(word)
            .and_then(|e| e.pos.first())
            .map(|first| first == tag)
            .unwrap_or(false)
    }
}

/// Lazy iterator over the words of one corpus snapshot.
#[derive(Debug, Clone)]
pub struct CorpusWords {
    corpus: Arc<Corpus>,
    next: usize,
}

impl Iterator for CorpusWords {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        let word = self.corpus.order.get(self.next)?.clone();
        self.next += 1;
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.corpus.order.len() - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CorpusWords {}

/// Caller-owned handle to the lexicon.
#[derive(Debug)]
pub struct LexicalStore {
    corpus: RwLock<Arc<Corpus>>,
}

impl LexicalStore {
    fn from_parts(base: Vec<RawEntry>, addenda: Vec<RawEntry>) -> Result<LexicalStore, LoadError> {
        let start = Instant::now();
        let corpus = Corpus::build(base, addenda)?;
        log::info!(
            "Loaded {} ({}) lexicon entries in {:?}",
            corpus.len(),
            corpus.addenda_count(),
            start.elapsed()
        );
        Ok(LexicalStore {
            corpus: RwLock::new(Arc::new(corpus)),
        })
    }

    /// The lexicon compiled into the crate, without addenda.
    pub fn bundled() -> Result<LexicalStore, LoadError> {
        let base = loader::parse_entries(BUNDLED_NAME, BUNDLED_LEXICON.as_bytes())?;
        LexicalStore::from_parts(base, vec![])
    }

    /// The bundled lexicon merged with the addenda at `addenda`, if that file
    /// exists. A missing addenda file is not an error.
    pub fn load<FS: Filesystem>(fs: &FS, addenda: Option<&Path>) -> Result<LexicalStore, LoadError> {
        let base = loader::parse_entries(BUNDLED_NAME, BUNDLED_LEXICON.as_bytes())?;
        LexicalStore::from_parts(base, read_addenda(fs, addenda)?)
    }

    /// Loads the base dictionary at `base`, then merges `addenda` if it exists.
    pub fn open<FS: Filesystem>(
        fs: &FS,
        base: &Path,
        addenda: Option<&Path>,
    ) -> Result<LexicalStore, LoadError> {
        let base = loader::read_entries(fs, base)?;
        LexicalStore::from_parts(base, read_addenda(fs, addenda)?)
    }

    /// Builds a store from dictionary text.
    pub fn parse(text: &str) -> Result<LexicalStore, LoadError> {
        let base = loader::parse_entries("<text>", text.as_bytes())?;
        LexicalStore::from_parts(base, vec![])
    }

    /// Builds a store from entries; later duplicates override earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Result<LexicalStore, LoadError>
    where
        I: IntoIterator<Item = (S, LexicalEntry)>,
        S: Into<SmolStr>,
    {
        let base = entries.into_iter().map(|(w, e)| (w.into(), e)).collect();
        LexicalStore::from_parts(base, vec![])
    }

    /// The current snapshot.
    #[inline]
    pub fn corpus(&self) -> Arc<Corpus> {
        Arc::clone(&self.corpus.read())
    }

    /// Pronunciation and tags for `word`, exact and case-sensitive.
    pub fn lookup(&self, word: &str) -> Option<LexicalEntry> {
        self.corpus().get(word).cloned()
    }

    /// Whether `word` has an entry.
    pub fn contains(&self, word: &str) -> bool {
        self.corpus().get(word).is_some()
    }

    /// Raw pronunciation of `word`.
    pub fn raw_pronunciation(&self, word: &str) -> Option<SmolStr> {
        self.corpus().get(word).map(|e| e.pronunciation.clone())
    }

    /// Part-of-speech tags of `word`.
    pub fn pos_tags(&self, word: &str) -> Option<Vec<SmolStr>> {
        self.corpus().get(word).map(|e| e.pos.clone())
    }

    /// Derived features of `word`.
    pub fn features(&self, word: &str) -> Option<Arc<Features>> {
        self.corpus().features(word)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.corpus().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.corpus().is_empty()
    }

    /// Number of entries that came from the addenda resource.
    pub fn addenda_count(&self) -> usize {
        self.corpus().addenda_count()
    }

    /// All words of the current snapshot. Restart by calling again; the order
    /// is stable for one snapshot.
    pub fn iter(&self) -> CorpusWords {
        CorpusWords {
            corpus: self.corpus(),
            next: 0,
        }
    }

    /// Words fully matching `pattern`.
    pub fn words(&self, pattern: &str) -> Result<HashSet<SmolStr>, QueryError> {
        let re = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| QueryError::InvalidArgument(format!("invalid pattern: {}", e)))?;

        Ok(self.iter().filter(|w| re.is_match(w)).collect())
    }

    /// Words whose primary tag is `tag`, in iteration order.
    pub fn words_with_pos(&self, tag: &str) -> Result<Vec<SmolStr>, QueryError> {
        pos::ensure_penn_tag(tag)?;
        let corpus = self.corpus();
        Ok(corpus
            .words()
            .iter()
            .filter(|w| corpus.has_primary_pos(w, tag))
            .cloned()
            .collect())
    }

    /// Discards every entry, addenda and cached feature, and installs `entries`.
    /// On error the current data is left untouched.
    pub fn replace_all<I, S>(&self, entries: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = (S, LexicalEntry)>,
        S: Into<SmolStr>,
    {
        let base = entries.into_iter().map(|(w, e)| (w.into(), e)).collect();
        let corpus = Corpus::build(base, vec![])?;
        log::debug!("Replacing lexical data with {} entries", corpus.len());
        *self.corpus.write() = Arc::new(corpus);
        Ok(())
    }

    /// Computes and caches derived features for every word of the current
    /// snapshot.
    pub fn preload_features(&self) {
        let start = Instant::now();
        let count = self.corpus().preload();
        log::info!("Created and cached features for {} words in {:?}", count, start.elapsed());
    }
}

fn read_addenda<FS: Filesystem>(fs: &FS, path: Option<&Path>) -> Result<Vec<RawEntry>, LoadError> {
    match path {
        Some(path) if fs.exists(path) => {
            let entries = loader::read_entries(fs, path)?;
            log::info!("Loaded {} entries from addenda {}", entries.len(), path.display());
            Ok(entries)
        }
        Some(path) => {
            log::debug!("No addenda at {}, skipping", path.display());
            Ok(vec![])
        }
        None => Ok(vec![]),
    }
}
