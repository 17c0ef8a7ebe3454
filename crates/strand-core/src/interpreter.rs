//! # Natural-Language Filter Interpreter
//!
//! Maps free-text phrases such as "single word palindromes" or
//! "strings longer than 5 characters" onto a `FilterPredicate`.
//!
//! This is fixed pattern matching, not language understanding. The
//! interpreter is an ordered list of rules, each a compiled pattern plus a
//! setter. Every rule runs against the lower-cased text; when two rules set
//! the same field the later one wins.
//!
//! A comparative length phrase needs the unit word right after its number.
//! Two joined comparatives may share one unit word, so
//! "longer than 10 and shorter than 20 characters" sets both bounds, while
//! "more than 3 words" never becomes a length bound.
//!
//! ## Outcomes
//!
//! - No rule matched: `StrandError::Unparseable`
//! - Rules matched but the filters contradict each other
//!   (`min_length > max_length`, or a negative maximum): `StrandError::Conflict`
//!
//! Character containment built here is case-insensitive.

use crate::predicate::{CharacterMatch, FilterPredicate};
use crate::primitives::FIRST_VOWEL;
use crate::StrandError;
use regex::{Captures, Regex};
use serde::Serialize;

/// The result of interpreting a query: the verbatim text and its filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretedQuery {
    /// The query exactly as received.
    pub original: String,
    /// The filters the rules produced.
    pub parsed_filters: FilterPredicate,
}

/// Working state threaded through the rules.
#[derive(Debug)]
struct Interpretation {
    filters: FilterPredicate,
    conflict: Option<String>,
}

type Setter = fn(&Captures<'_>, &mut Interpretation);

struct Rule {
    name: &'static str,
    pattern: Regex,
    apply: Setter,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Rule table, in evaluation order.
const RULES: &[(&str, &str, Setter)] = &[
    ("word_count_one", r"single word|one word", |_, st| {
        st.filters.word_count = Some(1);
    }),
    ("word_count_two", r"two word|2 word", |_, st| {
        st.filters.word_count = Some(2);
    }),
    ("word_count_three", r"three word|3 word", |_, st| {
        st.filters.word_count = Some(3);
    }),
    ("palindrome", r"palindromic|palindrome", |_, st| {
        st.filters.is_palindrome = Some(true);
    }),
    (
        "longer_than",
        r"(?:longer than|more than|greater than)\s+(\d+)\s+(?:characters?|(?:and|or)\s+(?:shorter|less|fewer|longer|more|greater)\s+than\s+\d+\s+characters?)",
        |caps, st| {
            st.filters.min_length = Some(number(caps).saturating_add(1));
        },
    ),
    (
        "shorter_than",
        r"(?:shorter than|less than|fewer than)\s+(\d+)\s+(?:characters?|(?:and|or)\s+(?:shorter|less|fewer|longer|more|greater)\s+than\s+\d+\s+characters?)",
        |caps, st| match number(caps).checked_sub(1) {
            Some(max) => st.filters.max_length = Some(max),
            None => {
                st.conflict = Some("max_length cannot be negative".to_string());
            }
        },
    ),
    (
        "exact_length",
        r"(?:exactly|precisely)\s+(\d+)\s+characters?",
        |caps, st| {
            st.filters.exact_length = Some(number(caps));
        },
    ),
    (
        "contains_letter",
        r"contains?\s+(?:the\s+)?letter\s+([a-z])",
        set_letter,
    ),
    ("first_vowel", r"first vowel", |_, st| {
        st.filters.contains_character = Some(FIRST_VOWEL);
    }),
    (
        "unique_characters",
        r"(\d+)\s+unique\s+characters?",
        |caps, st| {
            st.filters.unique_characters = Some(number(caps));
        },
    ),
    ("letter", r"letter\s+([a-z])", set_letter),
    (
        "containing_letter",
        r"containing\s+(?:the\s+)?letter\s+([a-z])",
        set_letter,
    ),
];

fn set_letter(caps: &Captures<'_>, st: &mut Interpretation) {
    if let Some(c) = caps.get(1).and_then(|m| m.as_str().chars().next()) {
        st.filters.contains_character = Some(c);
    }
}

/// First capture group as a number. The patterns only capture `\d+`, so the
/// sole failure mode is overflow, which saturates.
fn number(caps: &Captures<'_>) -> usize {
    caps.get(1)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
        .unwrap_or(0)
}

/// Translates free text into filter predicates.
#[derive(Debug)]
pub struct Interpreter {
    rules: Vec<Rule>,
}

impl Interpreter {
    /// Compile the rule list.
    pub fn new() -> Result<Self, StrandError> {
        let rules = RULES
            .iter()
            .map(|&(name, pattern, apply)| {
                Regex::new(pattern)
                    .map(|pattern| Rule {
                        name,
                        pattern,
                        apply,
                    })
                    .map_err(|e| StrandError::InvalidPattern(format!("{name}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    #[cfg(test)]
    fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Interpret `text`.
    pub fn interpret(&self, text: &str) -> Result<InterpretedQuery, StrandError> {
        let lowered = text.to_lowercase();
        let mut state = Interpretation {
            filters: FilterPredicate {
                character_match: CharacterMatch::CaseInsensitive,
                ..FilterPredicate::default()
            },
            conflict: None,
        };

        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(&lowered) {
                (rule.apply)(&caps, &mut state);
            }
        }

        if let Some(reason) = state.conflict {
            return Err(StrandError::Conflict(reason));
        }
        if state.filters.is_empty() {
            return Err(StrandError::Unparseable);
        }
        if let (Some(min), Some(max)) = (state.filters.min_length, state.filters.max_length) {
            if min > max {
                return Err(StrandError::Conflict(
                    "min_length cannot be greater than max_length".to_string(),
                ));
            }
        }

        Ok(InterpretedQuery {
            original: text.to_string(),
            parsed_filters: state.filters,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
