//! Unit-cost edit distance over token sequences.
//!
//! Tokens are characters in letter mode and phoneme symbols in sound mode; the
//! metric itself does not care which.

/// Minimum number of single-token insertions, deletions and substitutions
/// turning `a` into `b`.
///
/// Only two rows of the `(a.len() + 1) × (b.len() + 1)` table are kept.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let cost = if x == y { 0 } else { 1 };
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

/// Edit distance between the characters of two words.
pub fn letter_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}
