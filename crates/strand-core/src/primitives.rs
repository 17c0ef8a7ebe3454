//! # Fixed Primitives
//!
//! Constants compiled into the binary. Analysis and interpretation rules
//! are fixed; stored records are never re-analyzed when these change.

/// Character substituted for "the first vowel" in natural-language queries.
pub const FIRST_VOWEL: char = 'a';

/// Query parameters understood by the structured filter builder, in the
/// order they are validated.
pub const STRUCTURED_FILTER_PARAMS: [&str; 5] = [
    "is_palindrome",
    "min_length",
    "max_length",
    "word_count",
    "contains_character",
];

/// Name of the redb table holding analyzed records.
pub const RECORDS_TABLE: &str = "records";
