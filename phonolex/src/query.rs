//! The query surface as one trait, so front ends can hold a `dyn Lexicon`.
use hashbrown::HashSet;
use smol_str::SmolStr;

use crate::config::{LetterQuery, MatchConfig};
use crate::error::{LoadError, QueryError};
use crate::lexicon::{LexicalEntry, LexicalStore};
use crate::search::MatchResult;
use crate::{phonology, scan, search};

#[allow(missing_docs)]
pub trait Lexicon {
    fn lookup(&self, word: &str) -> Option<LexicalEntry>;
    fn contains(&self, word: &str) -> bool;
    fn best_letter_matches(
        &self,
        word: &str,
        query: &LetterQuery,
        config: &MatchConfig,
    ) -> Result<MatchResult, QueryError>;
    fn best_sound_matches(&self, word: &str, config: &MatchConfig) -> Result<MatchResult, QueryError>;
    fn best_sound_and_letter_matches(
        &self,
        word: &str,
        config: &MatchConfig,
    ) -> Result<HashSet<SmolStr>, QueryError>;
    fn rhymes_of(&self, word: &str) -> Result<HashSet<SmolStr>, QueryError>;
    fn alliterations_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError>;
    fn is_rhyme(&self, a: &str, b: &str) -> Result<bool, QueryError>;
    fn is_alliteration(&self, a: &str, b: &str) -> Result<bool, QueryError>;
    fn containing(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError>;
    fn substrings_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError>;
    fn superstrings_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError>;
    fn words(&self, pattern: &str) -> Result<HashSet<SmolStr>, QueryError>;
    fn random_word(&self, pos: Option<&str>, length: Option<usize>) -> Result<Option<SmolStr>, QueryError>;
    fn replace_lexical_data(&self, entries: Vec<(SmolStr, LexicalEntry)>) -> Result<(), LoadError>;
    fn preload_features(&self);
}

impl Lexicon for LexicalStore {
    fn lookup(&self, word: &str) -> Option<LexicalEntry> {
        LexicalStore::lookup(self, word)
    }

    fn contains(&self, word: &str) -> bool {
        LexicalStore::contains(self, word)
    }

    fn best_letter_matches(
        &self,
        word: &str,
        query: &LetterQuery,
        config: &MatchConfig,
    ) -> Result<MatchResult, QueryError> {
        search::best_letter_matches(self, word, query, config)
    }

    fn best_sound_matches(&self, word: &str, config: &MatchConfig) -> Result<MatchResult, QueryError> {
        search::best_sound_matches(self, word, config)
    }

    fn best_sound_and_letter_matches(
        &self,
        word: &str,
        config: &MatchConfig,
    ) -> Result<HashSet<SmolStr>, QueryError> {
        search::best_sound_and_letter_matches(self, word, config)
    }

    fn rhymes_of(&self, word: &str) -> Result<HashSet<SmolStr>, QueryError> {
        phonology::rhymes_of(self, word)
    }

    fn alliterations_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError> {
        phonology::alliterations_of(self, word, config)
    }

    fn is_rhyme(&self, a: &str, b: &str) -> Result<bool, QueryError> {
        phonology::is_rhyme(self, a, b)
    }

    fn is_alliteration(&self, a: &str, b: &str) -> Result<bool, QueryError> {
        phonology::is_alliteration(self, a, b)
    }

    fn containing(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError> {
        scan::containing(self, word, config)
    }

    fn substrings_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError> {
        scan::substrings_of(self, word, config)
    }

    fn superstrings_of(&self, word: &str, config: &MatchConfig) -> Result<HashSet<SmolStr>, QueryError> {
        scan::superstrings_of(self, word, config)
    }

    fn words(&self, pattern: &str) -> Result<HashSet<SmolStr>, QueryError> {
        LexicalStore::words(self, pattern)
    }

    fn random_word(&self, pos: Option<&str>, length: Option<usize>) -> Result<Option<SmolStr>, QueryError> {
        scan::random_word(self, pos, length)
    }

    fn replace_lexical_data(&self, entries: Vec<(SmolStr, LexicalEntry)>) -> Result<(), LoadError> {
        self.replace_all(entries)
    }

    fn preload_features(&self) {
        LexicalStore::preload_features(self)
    }
}
