//! Decoding of raw pronunciation strings.
//!
//! A raw pronunciation is a sequence of syllables separated by a single space.
//! Each syllable is a sequence of phonemes separated by `-`, and a phoneme is
//! a lower-case ARPAbet symbol from [`phoneme`] optionally followed by a stress
//! digit (`1` stressed, `0` unstressed):
//!
//! ```text
//! k-ae1-t          cat
//! z-ih1-r ow       zero
//! ax b-aw1-t       about
//! ```
//!
//! Strings that break this grammar are rejected with
//! [`CodecError::MalformedPronunciation`] instead of being sliced at the
//! wrong boundaries.
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::CodecError;
use crate::lexicon::{Corpus, LexicalStore};

pub mod phoneme;

/// Primary stress marker.
pub const STRESSED: char = '1';
/// Explicit no-stress marker.
pub const UNSTRESSED: char = '0';
/// Separates phonemes within a syllable.
pub const PHONEME_BOUNDARY: char = '-';
/// Separates syllables.
pub const SYLLABLE_BOUNDARY: char = ' ';

/// Lexical stress of one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stress {
    /// carries primary stress
    Stressed,
    /// carries no primary stress
    Unstressed,
}

/// Phoneme, syllable and stress views of one pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// flat phoneme list with stress digits removed
    pub phonemes: Vec<SmolStr>,
    /// phonemes grouped by syllable, stress digits removed
    pub syllables: Vec<Vec<SmolStr>>,
    /// one entry per syllable
    pub stresses: Vec<Stress>,
}

impl Features {
    /// Validates and decodes `raw`.
    pub fn parse(word: &str, raw: &str) -> Result<Features, CodecError> {
        Ok(Pronunciation::parse(word, raw)?.features())
    }

    /// Number of syllables.
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let syllables = self.syllables.iter().map(|s| s.iter().join("-")).join("/");
        let stresses = self
            .stresses
            .iter()
            .map(|s| match s {
                Stress::Stressed => STRESSED,
                Stress::Unstressed => UNSTRESSED,
            })
            .join("/");
        write!(f, "{} [{}]", syllables, stresses)
    }
}

/// A raw pronunciation string that is known to follow the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pronunciation<'a>(&'a str);

impl<'a> Pronunciation<'a> {
    /// Checks `raw` against the grammar. `word` is only used for error reporting.
    pub fn parse(word: &str, raw: &'a str) -> Result<Pronunciation<'a>, CodecError> {
        match check(raw) {
            Ok(()) => Ok(Pronunciation(raw)),
            Err(reason) => Err(CodecError::MalformedPronunciation {
                word: word.into(),
                raw: raw.into(),
                reason,
            }),
        }
    }

    /// Corpus entries are validated when the corpus is built.
    #[inline(always)]
    pub(crate) fn trusted(raw: &'a str) -> Pronunciation<'a> {
        Pronunciation(raw)
    }

    /// The raw string.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Number of syllables.
    pub fn syllable_count(&self) -> usize {
        self.0.split(SYLLABLE_BOUNDARY).count()
    }

    /// Decodes into phoneme, syllable and stress views.
    pub fn features(&self) -> Features {
        let mut phonemes = Vec::new();
        let mut syllables = Vec::new();
        let mut stresses = Vec::new();

        for syllable in self.0.split(SYLLABLE_BOUNDARY) {
            let mut stressed = false;
            let mut phones = Vec::new();

            for phone in syllable.split(PHONEME_BOUNDARY) {
                if phone.ends_with(STRESSED) {
                    stressed = true;
                }
                let phone = SmolStr::new(phoneme::strip_stress(phone));
                phonemes.push(phone.clone());
                phones.push(phone);
            }

            syllables.push(phones);
            stresses.push(if stressed {
                Stress::Stressed
            } else {
                Stress::Unstressed
            });
        }

        Features {
            phonemes,
            syllables,
            stresses,
        }
    }

    /// The final stressed vowel and everything after it, delimiters and stress
    /// digits included. `None` when nothing carries primary stress.
    ///
    /// ```
    /// # use phonolex::codec::Pronunciation;
    /// let p = Pronunciation::parse("zero", "z-ih1-r ow").unwrap();
    /// assert_eq!(p.last_stressed_suffix(), Some("ih1-r ow"));
    /// ```
    pub fn last_stressed_suffix(&self) -> Option<&'a str> {
        let raw = self.0;
        let idx = raw.rfind(STRESSED)?;
        let start = raw[..idx]
            .rfind(|c| c == PHONEME_BOUNDARY || c == SYLLABLE_BOUNDARY)
            .map(|i| i + 1)
            .unwrap_or(0);
        Some(&raw[start..])
    }

    /// The syllable holding the first primary stress.
    ///
    /// ```
    /// # use phonolex::codec::Pronunciation;
    /// let p = Pronunciation::parse("about", "ax b-aw1-t").unwrap();
    /// assert_eq!(p.first_stressed_syllable(), Some("b-aw1-t"));
    /// ```
    pub fn first_stressed_syllable(&self) -> Option<&'a str> {
        let raw = self.0;
        let idx = raw.find(STRESSED)?;
        let start = raw[..idx]
            .rfind(SYLLABLE_BOUNDARY)
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = raw[idx..]
            .find(SYLLABLE_BOUNDARY)
            .map(|i| idx + i)
            .unwrap_or(raw.len());
        Some(&raw[start..end])
    }
}

fn check(raw: &str) -> Result<(), &'static str> {
    if raw.is_empty() {
        return Err("empty pronunciation");
    }

    for syllable in raw.split(SYLLABLE_BOUNDARY) {
        if syllable.is_empty() {
            return Err("empty syllable");
        }

        for phone in syllable.split(PHONEME_BOUNDARY) {
            let symbol = match phone.as_bytes().last() {
                None => return Err("empty phoneme"),
                Some(b'0') | Some(b'1') => &phone[..phone.len() - 1],
                Some(_) => phone,
            };

            if symbol.is_empty() {
                return Err("stress digit without phoneme");
            }

            if !symbol.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err("phoneme must be ASCII letters with an optional 0/1 stress digit");
            }

            if !phoneme::is_consonant(symbol) && !phoneme::is_vowel(symbol) {
                return Err("unknown phoneme");
            }
        }
    }

    Ok(())
}

/// First consonant of a syllable's phonemes, stress digit removed. `None` if
/// the syllable holds no consonant.
pub fn first_consonant(syllable: &str) -> Option<&str> {
    syllable
        .split(PHONEME_BOUNDARY)
        .map(phoneme::strip_stress)
        .find(|p| phoneme::is_consonant(p))
}

/// Outcome of extracting a stress-anchored slice for a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressSlice {
    /// the word has no lexicon entry
    Unknown,
    /// the word is known but carries no primary stress
    NoStress,
    /// the extracted slice
    Found(SmolStr),
}

impl StressSlice {
    /// The slice, if one was found.
    pub fn found(&self) -> Option<&str> {
        match self {
            StressSlice::Found(s) => Some(s),
            _ => None,
        }
    }
}

/// Phonemes of `word`, `None` if it has no entry.
pub fn phonemes(store: &LexicalStore, word: &str) -> Option<Vec<SmolStr>> {
    store.corpus().features(word).map(|f| f.phonemes.clone())
}

/// [`Pronunciation::last_stressed_suffix`] of `word`'s entry.
pub fn last_stressed_suffix(store: &LexicalStore, word: &str) -> StressSlice {
    last_stressed_suffix_in(&store.corpus(), word)
}

/// [`Pronunciation::first_stressed_syllable`] of `word`'s entry.
pub fn first_stressed_syllable(store: &LexicalStore, word: &str) -> StressSlice {
    first_stressed_syllable_in(&store.corpus(), word)
}

pub(crate) fn last_stressed_suffix_in(corpus: &Corpus, word: &str) -> StressSlice {
    slice_in(corpus, word, |p| p.last_stressed_suffix())
}

pub(crate) fn first_stressed_syllable_in(corpus: &Corpus, word: &str) -> StressSlice {
    slice_in(corpus, word, |p| p.first_stressed_syllable())
}

fn slice_in<'a, F>(corpus: &'a Corpus, word: &str, f: F) -> StressSlice
where
    F: Fn(Pronunciation<'a>) -> Option<&'a str>,
{
    match corpus.pronunciation(word) {
        None => StressSlice::Unknown,
        Some(p) => match f(p) {
            Some(slice) => StressSlice::Found(slice.into()),
            None => StressSlice::NoStress,
        },
    }
}
