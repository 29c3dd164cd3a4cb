//! Plain corpus scans: containment, randomised enumeration and single-letter
//! edit neighbours.
use std::sync::Arc;

use hashbrown::HashSet;
use rand::Rng;
use smol_str::SmolStr;

use crate::config::MatchConfig;
use crate::error::{ensure_single_word, QueryError};
use crate::lexicon::{Corpus, LexicalStore};
use crate::pos;
use crate::search::AcceptanceFilter;

const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

fn containment_filter(config: &MatchConfig) -> AcceptanceFilter {
    AcceptanceFilter::ExcludeTrivialSuffixes {
        min_length: config.containment_min_length,
    }
}

fn scan_corpus<F>(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
    pred: F,
) -> Result<HashSet<SmolStr>, QueryError>
where
    F: Fn(&str) -> bool,
{
    ensure_single_word(word)?;
    let filter = containment_filter(config);
    Ok(store
        .corpus()
        .words()
        .iter()
        .filter(|c| filter.accepts(word, c) && pred(c.as_str()))
        .cloned()
        .collect())
}

/// Corpus words contained in `word`.
pub fn substrings_of(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<HashSet<SmolStr>, QueryError> {
    scan_corpus(store, word, config, |c| word.contains(c))
}

/// Corpus words containing `word`.
pub fn superstrings_of(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<HashSet<SmolStr>, QueryError> {
    scan_corpus(store, word, config, |c| c.contains(word))
}

/// Union of [`substrings_of`] and [`superstrings_of`].
pub fn containing(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<HashSet<SmolStr>, QueryError> {
    scan_corpus(store, word, config, |c| word.contains(c) || c.contains(word))
}

/// Visits every word of one corpus snapshot exactly once, starting at a random
/// offset and wrapping around, optionally keeping only words whose primary tag
/// matches.
#[derive(Debug, Clone)]
pub struct CorpusIterator {
    corpus: Arc<Corpus>,
    start: usize,
    visited: usize,
    pos: Option<SmolStr>,
}

impl CorpusIterator {
    /// A new traversal seeded from the thread-local generator.
    pub fn new(store: &LexicalStore, pos: Option<&str>) -> Result<CorpusIterator, QueryError> {
        CorpusIterator::with_rng(store, pos, &mut rand::thread_rng())
    }

    /// A new traversal with its start drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        store: &LexicalStore,
        pos: Option<&str>,
        rng: &mut R,
    ) -> Result<CorpusIterator, QueryError> {
        if let Some(tag) = pos {
            pos::ensure_penn_tag(tag)?;
        }

        let corpus = store.corpus();
        let start = match corpus.len() {
            0 => 0,
            n => rng.gen_range(0..n),
        };

        Ok(CorpusIterator {
            corpus,
            start,
            visited: 0,
            pos: pos.map(SmolStr::from),
        })
    }

    /// The snapshot being traversed.
    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }
}

impl Iterator for CorpusIterator {
    type Item = SmolStr;

    fn next(&mut self) -> Option<SmolStr> {
        let words = self.corpus.words();
        while self.visited < words.len() {
            let word = &words[(self.start + self.visited) % words.len()];
            self.visited += 1;

            match &self.pos {
                Some(tag) if !self.corpus.has_primary_pos(word, tag) => continue,
                _ => return Some(word.clone()),
            }
        }
        None
    }
}

/// A random word, optionally with the given primary tag and character length.
/// A length of zero means any length.
pub fn random_word(
    store: &LexicalStore,
    pos: Option<&str>,
    length: Option<usize>,
) -> Result<Option<SmolStr>, QueryError> {
    random_word_with_rng(store, pos, length, &mut rand::thread_rng())
}

/// [`random_word`] drawing from `rng`.
pub fn random_word_with_rng<R: Rng + ?Sized>(
    store: &LexicalStore,
    pos: Option<&str>,
    length: Option<usize>,
    rng: &mut R,
) -> Result<Option<SmolStr>, QueryError> {
    random_word_matching_rng(store, pos, length, None, rng)
}

/// A random word with `count` syllables, optionally with the given primary tag.
pub fn random_word_with_syllable_count(
    store: &LexicalStore,
    pos: Option<&str>,
    count: usize,
) -> Result<Option<SmolStr>, QueryError> {
    random_word_with_syllable_count_rng(store, pos, count, &mut rand::thread_rng())
}

/// [`random_word_with_syllable_count`] drawing from `rng`.
pub fn random_word_with_syllable_count_rng<R: Rng + ?Sized>(
    store: &LexicalStore,
    pos: Option<&str>,
    count: usize,
    rng: &mut R,
) -> Result<Option<SmolStr>, QueryError> {
    random_word_matching_rng(store, pos, None, Some(count), rng)
}

/// A random word satisfying every given constraint at once. A length of zero
/// means any length.
pub fn random_word_matching(
    store: &LexicalStore,
    pos: Option<&str>,
    length: Option<usize>,
    syllables: Option<usize>,
) -> Result<Option<SmolStr>, QueryError> {
    random_word_matching_rng(store, pos, length, syllables, &mut rand::thread_rng())
}

/// [`random_word_matching`] drawing from `rng`.
pub fn random_word_matching_rng<R: Rng + ?Sized>(
    store: &LexicalStore,
    pos: Option<&str>,
    length: Option<usize>,
    syllables: Option<usize>,
    rng: &mut R,
) -> Result<Option<SmolStr>, QueryError> {
    let it = CorpusIterator::with_rng(store, pos, rng)?;
    Ok(first_matching(it, length, syllables))
}

fn first_matching(
    mut it: CorpusIterator,
    length: Option<usize>,
    syllables: Option<usize>,
) -> Option<SmolStr> {
    let corpus = Arc::clone(it.corpus());
    let length = length.filter(|n| *n > 0);
    it.find(|w| {
        length.map_or(true, |n| w.chars().count() == n)
            && syllables.map_or(true, |n| {
                corpus
                    .pronunciation(w)
                    .map_or(false, |p| p.syllable_count() == n)
            })
    })
}

fn known_edits<I>(corpus: &Corpus, word: &str, edits: I) -> Result<HashSet<SmolStr>, QueryError>
where
    I: Iterator<Item = String>,
{
    ensure_single_word(word)?;
    Ok(edits
        .filter(|e| e != word && corpus.get(e).is_some())
        .map(SmolStr::from)
        .collect())
}

fn splice(chars: &[char], at: usize, skip: usize, insert: Option<char>) -> String {
    chars[..at]
        .iter()
        .copied()
        .chain(insert)
        .chain(chars[at + skip..].iter().copied())
        .collect()
}

/// Corpus words one `a`–`z` substitution away from `word`.
pub fn single_letter_substitutions(
    store: &LexicalStore,
    word: &str,
) -> Result<HashSet<SmolStr>, QueryError> {
    let chars: Vec<char> = word.chars().collect();
    let chars = &chars;
    let edits = (0..chars.len()).flat_map(move |i| {
        ALPHABET
            .filter(move |c| *c != chars[i])
            .map(move |c| splice(chars, i, 1, Some(c)))
    });
    known_edits(&store.corpus(), word, edits)
}

/// Corpus words one `a`–`z` insertion away from `word`.
pub fn single_letter_insertions(
    store: &LexicalStore,
    word: &str,
) -> Result<HashSet<SmolStr>, QueryError> {
    let chars: Vec<char> = word.chars().collect();
    let chars = &chars;
    let edits = (0..=chars.len()).flat_map(move |i| {
        ALPHABET.map(move |c| splice(chars, i, 0, Some(c)))
    });
    known_edits(&store.corpus(), word, edits)
}

/// Corpus words one deletion away from `word`.
pub fn single_letter_deletions(
    store: &LexicalStore,
    word: &str,
) -> Result<HashSet<SmolStr>, QueryError> {
    let chars: Vec<char> = word.chars().collect();
    let edits = (0..chars.len()).map(|i| splice(&chars, i, 1, None));
    known_edits(&store.corpus(), word, edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexicalEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> LexicalStore {
        LexicalStore::parse(
            "\
cat: k-ae1-t | nn
cats: k-ae1-t-s | nns
catalog: k-ae1 t-ax l-ao-g | nn vb
scatter: s-k-ae1 t-er | vb nn
at: ae1-t | in
hat: hh-ae1-t | nn
chat: ch-ae1-t | nn vb
bat: b-ae1-t | nn
ocean: ow1 sh-ax-n | nn
",
        )
        .unwrap()
    }

    #[test]
    fn containment() {
        let s = store();
        let config = MatchConfig::default();

        let sup = superstrings_of(&s, "cat", &config).unwrap();
        assert_eq!(sup.len(), 2);
        assert!(sup.contains("catalog"));
        assert!(sup.contains("scatter"));

        let sub = substrings_of(&s, "scatter", &config).unwrap();
        assert!(sub.is_empty());

        let config = MatchConfig {
            containment_min_length: 2,
            ..MatchConfig::default()
        };
        let sub = substrings_of(&s, "scatter", &config).unwrap();
        assert_eq!(sub.len(), 2);
        assert!(sub.contains("cat"));
        assert!(sub.contains("at"));

        let all = containing(&s, "chat", &config).unwrap();
        let union: HashSet<_> = substrings_of(&s, "chat", &config)
            .unwrap()
            .union(&superstrings_of(&s, "chat", &config).unwrap())
            .cloned()
            .collect();
        assert_eq!(all, union);
        assert!(!all.contains("chat"));
    }

    #[test]
    fn iterator_visits_everything_once() {
        let s = store();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let seen: Vec<_> = CorpusIterator::with_rng(&s, None, &mut rng).unwrap().collect();
            assert_eq!(seen.len(), s.len());
            let unique: HashSet<_> = seen.iter().collect();
            assert_eq!(unique.len(), s.len());
        }
    }

    #[test]
    fn iterator_wraps_in_order() {
        let s = store();
        let order: Vec<_> = s.iter().collect();
        let seen: Vec<_> = CorpusIterator::new(&s, None).unwrap().collect();
        let start = order.iter().position(|w| *w == seen[0]).unwrap();
        for (i, w) in seen.iter().enumerate() {
            assert_eq!(*w, order[(start + i) % order.len()]);
        }
    }

    #[test]
    fn iterator_pos_filter() {
        let s = store();
        let nouns: HashSet<_> = CorpusIterator::new(&s, Some("nn")).unwrap().collect();
        assert_eq!(nouns.len(), 6);
        assert!(!nouns.contains("scatter"));
        assert!(!nouns.contains("cats"));

        assert!(CorpusIterator::new(&s, Some("noun")).is_err());
        assert_eq!(CorpusIterator::new(&s, Some("uh")).unwrap().count(), 0);
    }

    #[test]
    fn random_selection() {
        let s = store();
        let mut rng = StdRng::seed_from_u64(42);

        let w = random_word_with_rng(&s, None, Some(7), &mut rng).unwrap().unwrap();
        assert!(w == "catalog" || w == "scatter");

        let w = random_word_with_rng(&s, Some("vb"), None, &mut rng).unwrap().unwrap();
        assert_eq!(w, "scatter");

        assert_eq!(random_word(&s, None, Some(12)).unwrap(), None);
        assert!(random_word(&s, None, None).unwrap().is_some());

        let w = random_word_with_syllable_count(&s, None, 3).unwrap();
        assert_eq!(w.as_deref(), Some("catalog"));
        let w = random_word_with_syllable_count(&s, Some("nn"), 2).unwrap();
        assert_eq!(w.as_deref(), Some("ocean"));
        assert_eq!(random_word_with_syllable_count(&s, None, 4).unwrap(), None);
    }

    #[test]
    fn zero_length_means_any() {
        let s = store();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(random_word_with_rng(&s, None, Some(0), &mut rng).unwrap().is_some());
        assert!(random_word(&s, Some("in"), Some(0)).unwrap().is_some());
    }

    #[test]
    fn length_and_syllables_combine() {
        let s = store();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let w = random_word_matching_rng(&s, None, Some(3), Some(1), &mut rng).unwrap().unwrap();
            assert_eq!(w.chars().count(), 3);
            assert!(["cat", "hat", "bat"].contains(&w.as_str()));
        }
        // the only two-syllable words have five and seven letters
        assert_eq!(random_word_matching(&s, None, Some(3), Some(2)).unwrap(), None);
        assert_eq!(
            random_word_matching(&s, None, Some(7), Some(2)).unwrap().as_deref(),
            Some("scatter")
        );
    }

    #[test]
    fn syllable_filter_reads_the_iterated_snapshot() {
        let s = store();
        let it = CorpusIterator::new(&s, None).unwrap();
        s.replace_all(vec![("dog", LexicalEntry::new("d-ao1-g", "nn"))]).unwrap();
        assert_eq!(first_matching(it, None, Some(3)).as_deref(), Some("catalog"));
        let it = CorpusIterator::new(&s, None).unwrap();
        assert_eq!(first_matching(it, None, Some(3)), None);
    }

    #[test]
    fn empty_corpus_iterates_nothing() {
        let s = LexicalStore::parse("").unwrap();
        assert_eq!(CorpusIterator::new(&s, None).unwrap().count(), 0);
        assert_eq!(random_word(&s, None, None).unwrap(), None);
    }

    #[test]
    fn single_letter_edits() {
        let s = store();

        let subs = single_letter_substitutions(&s, "cat").unwrap();
        assert_eq!(subs.len(), 2);
        assert!(subs.contains("hat"));
        assert!(subs.contains("bat"));

        let ins = single_letter_insertions(&s, "cat").unwrap();
        assert_eq!(ins.len(), 2);
        assert!(ins.contains("cats"));
        assert!(ins.contains("chat"));
        assert!(single_letter_insertions(&s, "hat").unwrap().contains("chat"));

        let del = single_letter_deletions(&s, "chat").unwrap();
        assert_eq!(del.len(), 2);
        assert!(del.contains("hat"));
        assert!(del.contains("cat"));

        assert!(single_letter_deletions(&s, "cat at").is_err());
    }
}
