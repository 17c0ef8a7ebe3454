//! # Structured Filter Builder
//!
//! Validates explicit filter parameters (all arriving as text) and
//! normalizes them into a `FilterPredicate`.
//!
//! - Recognized parameters: `is_palindrome`, `min_length`, `max_length`,
//!   `word_count`, `contains_character`
//! - Unrecognized parameters are ignored
//! - Fail fast: parameters are checked in the order above and the first
//!   malformed one is reported
//! - Character containment built here is case-sensitive

use crate::predicate::{CharacterMatch, FilterPredicate};
use crate::StrandError;
use std::collections::BTreeMap;

/// Build a predicate from query-style parameters.
///
/// Only supplied parameters are set, so the predicate doubles as the echo of
/// the filters that were applied.
pub fn build_structured_filter(
    params: &BTreeMap<String, String>,
) -> Result<FilterPredicate, StrandError> {
    let mut predicate = FilterPredicate {
        character_match: CharacterMatch::CaseSensitive,
        ..FilterPredicate::default()
    };

    if let Some(raw) = params.get("is_palindrome") {
        predicate.is_palindrome = Some(parse_bool("is_palindrome", raw)?);
    }
    if let Some(raw) = params.get("min_length") {
        predicate.min_length = Some(parse_count("min_length", raw)?);
    }
    if let Some(raw) = params.get("max_length") {
        predicate.max_length = Some(parse_count("max_length", raw)?);
    }
    if let Some(raw) = params.get("word_count") {
        predicate.word_count = Some(parse_count("word_count", raw)?);
    }
    if let Some(raw) = params.get("contains_character") {
        predicate.contains_character = Some(parse_single_char("contains_character", raw)?);
    }

    Ok(predicate)
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, StrandError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(StrandError::validation(field, "must be true/false")),
    }
}

/// Non-negative base-10 integer. Signs other than a leading `+`, decimal
/// points and surrounding whitespace are rejected.
fn parse_count(field: &str, raw: &str) -> Result<usize, StrandError> {
    raw.parse::<usize>()
        .map_err(|_| StrandError::validation(field, "must be a non-negative integer"))
}

fn parse_single_char(field: &str, raw: &str) -> Result<char, StrandError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(StrandError::validation(field, "must be a single character")),
    }
}

// =============================================================================
// TESTS
// =============================================================================
