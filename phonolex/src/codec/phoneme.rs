//! ARPAbet phoneme classes, lower-cased as they appear in the lexicon.

/// Consonant symbols. `h` is accepted alongside `hh` since older addenda files
/// spell it that way.
pub const CONSONANTS: &[&str] = &[
    "b", "ch", "d", "dh", "f", "g", "h", "hh", "jh", "k", "l", "m", "n", "ng", "p", "r", "s",
    "sh", "t", "th", "v", "w", "y", "z", "zh",
];

/// Vowel symbols.
pub const VOWELS: &[&str] = &[
    "aa", "ae", "ah", "ao", "aw", "ax", "axr", "ay", "eh", "er", "ey", "ih", "ix", "iy", "ow",
    "oy", "uh", "uw",
];

/// Removes a trailing stress digit, if any.
#[inline]
pub fn strip_stress(phoneme: &str) -> &str {
    phoneme.trim_end_matches(|c| c == super::STRESSED || c == super::UNSTRESSED)
}

/// Whether the symbol (with or without stress digit) is a consonant.
pub fn is_consonant(phoneme: &str) -> bool {
    CONSONANTS.contains(&strip_stress(phoneme))
}

/// Whether the symbol (with or without stress digit) is a vowel.
pub fn is_vowel(phoneme: &str) -> bool {
    VOWELS.contains(&strip_stress(phoneme))
}
