//! Nearest-neighbour search over the whole corpus.
//!
//! A search is one linear scan keeping the smallest distance seen so far and
//! every admissible candidate tied at it. Candidates are compared as token
//! sequences: characters in letter mode, phoneme symbols in sound mode.
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::config::{LetterQuery, MatchConfig};
use crate::distance::edit_distance;
use crate::error::{ensure_single_word, QueryError};
use crate::lexicon::{Corpus, LexicalStore};

/// Decides whether a candidate may enter a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceFilter {
    /// accept everything
    Unfiltered,
    /// reject candidates shorter than `min_length` characters and those equal
    /// to the input, the input plus `s` or the input plus `es`
    ExcludeTrivialSuffixes {
        /// minimum candidate length in characters
        min_length: usize,
    },
}

impl AcceptanceFilter {
    /// Whether `candidate` is admissible for a query on `input`.
    pub fn accepts(&self, input: &str, candidate: &str) -> bool {
        match *self {
            AcceptanceFilter::Unfiltered => true,
            AcceptanceFilter::ExcludeTrivialSuffixes { min_length } => {
                if candidate.chars().count() < min_length {
                    return false;
                }
                !matches!(candidate.strip_prefix(input), Some("") | Some("s") | Some("es"))
            }
        }
    }
}

/// Outcome of a nearest-neighbour search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// smallest distance achieved by an admissible candidate, `None` when
    /// there was none
    pub distance: Option<usize>,
    /// every admissible candidate at `distance`
    pub words: HashSet<SmolStr>,
}

impl MatchResult {
    /// The empty result.
    pub fn none() -> MatchResult {
        MatchResult::default()
    }

    /// Whether no candidate was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

struct NeighborScan<'a, T> {
    word: &'a str,
    input: &'a [T],
    filter: AcceptanceFilter,
    min_distance: usize,
    best: Option<usize>,
    words: HashSet<SmolStr>,
}

impl<'a, T: PartialEq> NeighborScan<'a, T> {
    fn new(word: &'a str, input: &'a [T], filter: AcceptanceFilter) -> Self {
        NeighborScan {
            word,
            input,
            filter,
            min_distance: 1,
            best: None,
            words: HashSet::new(),
        }
    }

    fn with_min_distance(mut self, min_distance: usize) -> Self {
        self.min_distance = min_distance.max(1);
        self
    }

    fn consider(&mut self, candidate: &SmolStr, tokens: &[T]) {
        // distance is at least the length difference
        if let Some(best) = self.best {
            if self.input.len().abs_diff(tokens.len()) > best {
                return;
            }
        }

        if tokens == self.input {
            return;
        }

        let d = edit_distance(self.input, tokens);
        if d < self.min_distance {
            return;
        }

        match self.best {
            Some(best) if d > best => {}
            Some(best) if d == best => {
                if self.filter.accepts(self.word, candidate) {
                    self.words.insert(candidate.clone());
                }
            }
            _ => {
                if self.filter.accepts(self.word, candidate) {
                    log::trace!("new best for '{}': '{}' at {}", self.word, candidate, d);
                    self.best = Some(d);
                    self.words.clear();
                    self.words.insert(candidate.clone());
                }
            }
        }
    }

    fn finish(self) -> MatchResult {
        MatchResult {
            distance: self.best,
            words: self.words,
        }
    }
}

/// Closest words by spelling.
pub fn best_letter_matches(
    store: &LexicalStore,
    word: &str,
    query: &LetterQuery,
    config: &MatchConfig,
) -> Result<MatchResult, QueryError> {
    ensure_single_word(word)?;
    let corpus = store.corpus();
    Ok(letter_matches_in(corpus.words().iter(), word, query, config))
}

/// Closest words by pronunciation. Empty when `word` has no entry.
pub fn best_sound_matches(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<MatchResult, QueryError> {
    ensure_single_word(word)?;
    Ok(sound_matches_in(&store.corpus(), word, config))
}

/// Closest words by pronunciation, narrowed to those closest by spelling.
pub fn best_sound_and_letter_matches(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<HashSet<SmolStr>, QueryError> {
    ensure_single_word(word)?;
    let corpus = store.corpus();
    let by_sound = sound_matches_in(&corpus, word, config);
    let mut words =
        letter_matches_in(by_sound.words.iter(), word, &LetterQuery::default(), config).words;
    words.remove(word);
    Ok(words)
}

pub(crate) fn letter_matches_in<'c, I>(
    candidates: I,
    word: &str,
    query: &LetterQuery,
    config: &MatchConfig,
) -> MatchResult
where
    I: IntoIterator<Item = &'c SmolStr>,
{
    if word.is_empty() {
        return MatchResult::none();
    }

    let input: Vec<char> = word.chars().collect();
    let filter = AcceptanceFilter::ExcludeTrivialSuffixes {
        min_length: config.letter_min_length,
    };
    let mut scan = NeighborScan::new(word, &input, filter).with_min_distance(query.min_distance);
    let mut tokens = Vec::new();

    for candidate in candidates {
        tokens.clear();
        tokens.extend(candidate.chars());
        if query.preserve_length && tokens.len() != input.len() {
            continue;
        }
        scan.consider(candidate, &tokens);
    }

    scan.finish()
}

pub(crate) fn sound_matches_in(corpus: &Corpus, word: &str, config: &MatchConfig) -> MatchResult {
    let features = match corpus.features(word) {
        Some(f) => f,
        None => return MatchResult::none(),
    };

    let filter = AcceptanceFilter::ExcludeTrivialSuffixes {
        min_length: config.sound_min_length,
    };
    let mut scan = NeighborScan::new(word, &features.phonemes, filter);

    for candidate in corpus.words() {
        if let Some(f) = corpus.features(candidate) {
            scan.consider(candidate, &f.phonemes);
        }
    }

    scan.finish()
}
