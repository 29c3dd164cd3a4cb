//! Tunables for the search and scan operations.
use serde::{Deserialize, Serialize};

/// Minimum candidate lengths applied by the different query families.
///
/// Lengths are counted in characters of the candidate word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// acceptance-filter minimum for letter-mode nearest-neighbour search
    pub letter_min_length: usize,
    /// acceptance-filter minimum for sound-mode nearest-neighbour search
    pub sound_min_length: usize,
    /// acceptance-filter minimum applied to alliteration hits
    pub alliteration_min_length: usize,
    /// minimum length of words returned by substring/superstring scans
    pub containment_min_length: usize,
}

impl MatchConfig {
    /// The stock configuration.
    pub const fn default() -> MatchConfig {
        MatchConfig {
            letter_min_length: 2,
            sound_min_length: 3,
            alliteration_min_length: 4,
            containment_min_length: 4,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig::default()
    }
}

/// Options specific to letter-mode search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterQuery {
    /// only consider candidates with as many characters as the input
    pub preserve_length: bool,
    /// distances below this floor are rejected
    pub min_distance: usize,
}

impl LetterQuery {
    /// No length restriction, every non-zero distance admissible.
    pub const fn default() -> LetterQuery {
        LetterQuery {
            preserve_length: false,
            min_distance: 1,
        }
    }
}

impl Default for LetterQuery {
    fn default() -> Self {
        LetterQuery::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{ "sound_min_length": 5 }"#).unwrap();
        assert_eq!(cfg.sound_min_length, 5);
        assert_eq!(cfg.letter_min_length, 2);
        assert_eq!(cfg.containment_min_length, 4);

        let q: LetterQuery = serde_json::from_str(r#"{ "preserve_length": true }"#).unwrap();
        assert!(q.preserve_length);
        assert_eq!(q.min_distance, 1);
    }
}
