//! # Filter Predicate
//!
//! The canonical filter shape shared by the structured builder and the
//! natural-language interpreter, and its evaluation against a record.
//!
//! Constraints are independent and combine with logical AND. An unset
//! constraint does not restrict anything, so the empty predicate matches
//! every record.

use crate::StringRecord;
use serde::{Deserialize, Serialize};

/// How `contains_character` is compared against a record's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterMatch {
    /// Exact character comparison (structured filters).
    #[default]
    CaseSensitive,
    /// Comparison after lower-casing both sides (natural-language filters).
    CaseInsensitive,
}

/// A set of AND-combined constraints over a record.
///
/// Serializes to only the constraints that are set, which is the echo
/// returned to clients as `filters_applied` / `parsed_filters`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPredicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_characters: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
    /// Not part of the echo; fixed by whichever path built the predicate.
    #[serde(skip)]
    pub character_match: CharacterMatch,
}

impl FilterPredicate {
    /// Create an empty predicate (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.exact_length.is_none()
            && self.unique_characters.is_none()
            && self.contains_character.is_none()
    }

    /// Whether `record` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, record: &StringRecord) -> bool {
        let props = record.properties();

        self.is_palindrome.is_none_or(|p| props.is_palindrome == p)
            && self.min_length.is_none_or(|min| props.length >= min)
            && self.max_length.is_none_or(|max| props.length <= max)
            && self.exact_length.is_none_or(|len| props.length == len)
            && self.word_count.is_none_or(|wc| props.word_count == wc)
            && self
                .unique_characters
                .is_none_or(|uc| props.unique_characters == uc)
            && self
                .contains_character
                .is_none_or(|c| self.value_contains(record.value(), c))
    }

    fn value_contains(&self, value: &str, target: char) -> bool {
        match self.character_match {
            CharacterMatch::CaseSensitive => value.contains(target),
            CharacterMatch::CaseInsensitive => value
                .chars()
                .any(|c| c.to_lowercase().eq(target.to_lowercase())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
