//! # Property Calculator
//!
//! Pure functions turning a string into its analysis properties.
//!
//! Every function is total over any `&str` (the empty string included),
//! deterministic and free of side effects.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Count of Unicode code points in `s`.
#[must_use]
pub fn length(s: &str) -> usize {
    s.chars().count()
}

/// Whether `s` reads the same in both directions.
///
/// The check lower-cases `s`, then keeps only ASCII letters and digits.
/// A string with nothing left after stripping is a palindrome.
#[must_use]
pub fn is_palindrome(s: &str) -> bool {
    let cleaned: Vec<char> = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    cleaned.iter().eq(cleaned.iter().rev())
}

/// Count of distinct raw characters (case-sensitive, nothing stripped).
#[must_use]
pub fn unique_characters(s: &str) -> usize {
    s.chars().collect::<BTreeSet<_>>().len()
}

/// Number of tokens separated by runs of whitespace.
///
/// Leading and trailing whitespace is ignored; an empty or all-whitespace
/// string has no words.
#[must_use]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// SHA-256 over the UTF-8 bytes of `s`, encoded as lowercase hex.
#[must_use]
pub fn sha256_hex(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}

/// Occurrence count of every character in `s`.
#[must_use]
pub fn character_frequency(s: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for c in s.chars() {
        *frequency.entry(c).or_insert(0usize) += 1;
    }
    frequency
}

// =============================================================================
// TESTS
// =============================================================================
