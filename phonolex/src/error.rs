//! Error types for loading and querying a lexicon.
//!
//! A word missing from the lexicon is never an error. Lookups report it as
//! `None`, searches as an empty result.

use smol_str::SmolStr;

/// Errors raised while building a [`LexicalStore`](crate::LexicalStore).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The base or addenda resource could not be opened or read
    #[error("Unable to read lexicon resource '{path}': {source}")]
    ResourceUnavailable {
        /// path or name of the resource
        path: String,
        /// underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line does not follow `word: pronunciation | tags`
    #[error("Illegal lexicon entry at line {line}: '{content}'")]
    MalformedEntry {
        /// 1-based line number within its resource
        line: usize,
        /// the offending line
        content: String,
    },

    /// An entry's pronunciation violates the delimiter grammar
    #[error(transparent)]
    Pronunciation(#[from] CodecError),
}

/// Errors raised while decoding a raw pronunciation string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The pronunciation does not parse into syllables and phonemes
    #[error("Malformed pronunciation for '{word}': '{raw}' ({reason})")]
    MalformedPronunciation {
        /// word the pronunciation belongs to
        word: SmolStr,
        /// the raw pronunciation string
        raw: SmolStr,
        /// which rule was broken
        reason: &'static str,
    },
}

/// Errors raised by query operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The arguments are unusable: a multi-word string where one word is
    /// required, an unknown part-of-speech tag or an invalid regular expression
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl QueryError {
    pub(crate) fn multiple_words(word: &str) -> QueryError {
        QueryError::InvalidArgument(format!("expected a single word, got '{}'", word))
    }
}

/// Rejects strings containing whitespace before any scan begins.
pub(crate) fn ensure_single_word(word: &str) -> Result<(), QueryError> {
    if word.chars().any(char::is_whitespace) {
        return Err(QueryError::multiple_words(word));
    }
    Ok(())
}
