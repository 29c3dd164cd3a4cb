//! Rhyme and alliteration.
//!
//! Two words rhyme when their final stressed vowel and every sound after it
//! are identical. Two words alliterate when the first consonant of their first
//! stressed syllable is the same phoneme.
use hashbrown::HashSet;
use smol_str::SmolStr;

use crate::codec::{first_consonant, first_stressed_syllable_in, last_stressed_suffix_in};
use crate::config::MatchConfig;
use crate::error::{ensure_single_word, QueryError};
use crate::lexicon::{Corpus, LexicalStore};
use crate::search::AcceptanceFilter;

/// Filter applied to [`rhymes_of`] hits.
pub const RHYME_FILTER: AcceptanceFilter = AcceptanceFilter::Unfiltered;

/// Filter applied to [`alliterations_of`] hits.
pub fn alliteration_filter(config: &MatchConfig) -> AcceptanceFilter {
    AcceptanceFilter::ExcludeTrivialSuffixes {
        min_length: config.alliteration_min_length,
    }
}

/// Whether `a` and `b` rhyme. Unknown or unstressed words never rhyme, and a
/// word never rhymes with itself in any letter case.
pub fn is_rhyme(store: &LexicalStore, a: &str, b: &str) -> Result<bool, QueryError> {
    ensure_single_word(a)?;
    ensure_single_word(b)?;
    Ok(is_rhyme_in(&store.corpus(), a, b))
}

/// Whether `a` and `b` alliterate. Identical non-empty words always do.
pub fn is_alliteration(store: &LexicalStore, a: &str, b: &str) -> Result<bool, QueryError> {
    ensure_single_word(a)?;
    ensure_single_word(b)?;
    Ok(is_alliteration_in(&store.corpus(), a, b))
}

/// Every corpus word rhyming with `word`.
pub fn rhymes_of(store: &LexicalStore, word: &str) -> Result<HashSet<SmolStr>, QueryError> {
    ensure_single_word(word)?;
    let corpus = store.corpus();

    let suffix = match last_stressed_suffix_in(&corpus, word).found() {
        Some(s) => SmolStr::from(s),
        None => return Ok(HashSet::new()),
    };

    Ok(corpus
        .words()
        .iter()
        .filter(|c| !same_ignoring_case(word, c) && RHYME_FILTER.accepts(word, c))
        .filter(|c| last_stressed_suffix_in(&corpus, c).found() == Some(suffix.as_str()))
        .cloned()
        .collect())
}

/// Every admissible corpus word alliterating with `word`.
pub fn alliterations_of(
    store: &LexicalStore,
    word: &str,
    config: &MatchConfig,
) -> Result<HashSet<SmolStr>, QueryError> {
    ensure_single_word(word)?;
    let corpus = store.corpus();
    let filter = alliteration_filter(config);

    Ok(corpus
        .words()
        .iter()
        .filter(|c| filter.accepts(word, c) && is_alliteration_in(&corpus, word, c))
        .cloned()
        .collect())
}

pub(crate) fn is_rhyme_in(corpus: &Corpus, a: &str, b: &str) -> bool {
    if same_ignoring_case(a, b) {
        return false;
    }

    match (
        last_stressed_suffix_in(corpus, a),
        last_stressed_suffix_in(corpus, b),
    ) {
        (x, y) if x.found().is_some() => x == y,
        _ => false,
    }
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

pub(crate) fn is_alliteration_in(corpus: &Corpus, a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let first = |w: &str| {
        first_stressed_syllable_in(corpus, w)
            .found()
            .and_then(first_consonant)
            .map(SmolStr::from)
    };

    match (first(a), first(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LexicalStore {
        LexicalStore::parse(
            "\
cat: k-ae1-t | nn
hat: hh-ae1-t | nn
bat: b-ae1-t | nn
cats: k-ae1-t-s | nns
hot: hh-aa1-t | nn
the: dh-ax | dt
combat: k-aa1-m b-ae-t | nn
kite: k-ay1-t | nn
about: ax b-aw1-t | in
ocean: ow1 sh-ax-n | nn
Cat: k-ae1-t | nnp
",
        )
        .unwrap()
    }

    #[test]
    fn rhyme() {
        let s = store();
        assert!(is_rhyme(&s, "cat", "hat").unwrap());
        assert!(is_rhyme(&s, "hat", "bat").unwrap());
        assert!(!is_rhyme(&s, "cat", "hot").unwrap());
        assert!(!is_rhyme(&s, "cat", "cats").unwrap());
        // only the last stressed vowel anchors the suffix
        assert!(!is_rhyme(&s, "cat", "combat").unwrap());
    }

    #[test]
    fn rhyme_needs_stress_and_entries() {
        let s = store();
        assert!(!is_rhyme(&s, "the", "the").unwrap());
        assert!(!is_rhyme(&s, "the", "cat").unwrap());
        assert!(!is_rhyme(&s, "dog", "fog").unwrap());
        assert!(!is_rhyme(&s, "cat", "cat").unwrap());
        assert!(!is_rhyme(&s, "cat", "Cat").unwrap());
    }

    #[test]
    fn alliteration() {
        let s = store();
        assert!(is_alliteration(&s, "cat", "cats").unwrap());
        assert!(is_alliteration(&s, "cat", "kite").unwrap());
        assert!(!is_alliteration(&s, "cat", "hat").unwrap());
        // first stressed syllable, not first syllable
        assert!(is_alliteration(&s, "about", "bat").unwrap());
        // no consonant in the stressed syllable
        assert!(!is_alliteration(&s, "ocean", "hot").unwrap());
    }

    #[test]
    fn alliteration_identity() {
        let s = store();
        assert!(is_alliteration(&s, "cat", "cat").unwrap());
        assert!(is_alliteration(&s, "dog", "dog").unwrap());
        assert!(!is_alliteration(&s, "", "").unwrap());
        assert!(!is_alliteration(&s, "dog", "dig").unwrap());
    }

    #[test]
    fn rhymes_unfiltered() {
        let s = store();
        let rhymes = rhymes_of(&s, "cat").unwrap();
        assert_eq!(rhymes.len(), 2);
        assert!(rhymes.contains("hat"));
        assert!(rhymes.contains("bat"));
        assert!(!rhymes.contains("Cat"));

        assert!(rhymes_of(&s, "the").unwrap().is_empty());
        assert!(rhymes_of(&s, "dog").unwrap().is_empty());
    }

    #[test]
    fn alliterations_filtered() {
        let s = store();
        let config = MatchConfig::default();

        let hits = alliterations_of(&s, "cat", &config).unwrap();
        // cats is the plural, Cat is too short
        assert_eq!(hits.len(), 2);
        assert!(hits.contains("combat"));
        assert!(hits.contains("kite"));
        assert!(!hits.contains("cats"));
        assert!(!hits.contains("Cat"));

        let config = MatchConfig {
            alliteration_min_length: 3,
            ..MatchConfig::default()
        };
        let hits = alliterations_of(&s, "cat", &config).unwrap();
        assert!(hits.contains("Cat"));
        assert!(!hits.contains("hat"));
    }

    #[test]
    fn symmetric() {
        let s = store();
        let words: Vec<_> = s.iter().collect();
        for a in &words {
            for b in &words {
                assert_eq!(is_rhyme(&s, a, b).unwrap(), is_rhyme(&s, b, a).unwrap());
                assert_eq!(
                    is_alliteration(&s, a, b).unwrap(),
                    is_alliteration(&s, b, a).unwrap()
                );
            }
        }
    }
}
