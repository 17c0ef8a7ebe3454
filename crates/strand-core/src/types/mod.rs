//! # Core Type Definitions
//!
//! This module contains the record model shared by every Strand component:
//! - Content-addressed identifiers (`RecordId`)
//! - Derived analysis results (`Properties`)
//! - Stored records (`StringRecord`)
//! - Error types (`StrandError`)
//!
//! ## Immutability
//!
//! A `StringRecord` is built once from its value and a creation timestamp.
//! Its fields are private; callers only ever read them.

use crate::properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Content-derived identifier of a record: the lowercase SHA-256 hex digest
/// of the record's value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_digest(digest: String) -> Self {
        Self(digest)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// Properties derived from a string value.
///
/// Every field is computed by `Properties::compute`; there is no way to
/// set one independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Number of Unicode code points.
    pub length: usize,
    /// Palindrome check over lower-cased ASCII letters and digits.
    pub is_palindrome: bool,
    /// Number of distinct raw characters.
    pub unique_characters: usize,
    /// Number of whitespace-separated words.
    pub word_count: usize,
    /// SHA-256 of the UTF-8 bytes, lowercase hex.
    #[serde(rename = "sha256_hash")]
    pub hash: String,
    /// Occurrence count of every character in the value.
    #[serde(rename = "character_frequency_map")]
    pub character_frequency: BTreeMap<char, usize>,
}

impl Properties {
    /// Compute all properties of `value`.
    #[must_use]
    pub fn compute(value: &str) -> Self {
        Self {
            length: properties::length(value),
            is_palindrome: properties::is_palindrome(value),
            unique_characters: properties::unique_characters(value),
            word_count: properties::word_count(value),
            hash: properties::sha256_hex(value),
            character_frequency: properties::character_frequency(value),
        }
    }
}

// =============================================================================
// STRING RECORD
// =============================================================================

/// A stored analysis result for one unique string value.
///
/// Not `Deserialize`: the only way to obtain a record is to analyze a value,
/// or to load one back from a `RecordStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringRecord {
    id: RecordId,
    value: String,
    properties: Properties,
    created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and build its record.
    ///
    /// The digest is computed once and shared by `id` and `properties.hash`.
    #[must_use]
    pub fn new(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = Properties::compute(&value);
        let id = RecordId::from_properties(&properties);
        Self {
            id,
            value,
            properties,
            created_at,
        }
    }

    /// Reassemble a record loaded from storage.
    pub(crate) fn from_parts(
        id: RecordId,
        value: String,
        properties: Properties,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            value,
            properties,
            created_at,
        }
    }

    /// The content-derived identifier.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The original string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The derived properties.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Creation timestamp (UTC).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Strand system.
///
/// - Every condition is local and recoverable
/// - The CORE never logs; the caller decides presentation
/// - Storage faults are carried as opaque strings
#[derive(Debug, Error)]
pub enum StrandError {
    /// The input for a field was not a string.
    #[error("Invalid data type for \"{field}\" (must be string)")]
    InvalidType { field: String },

    /// A required field was absent.
    #[error("Invalid request body or missing \"{0}\" field")]
    MissingField(String),

    /// The value has already been analyzed.
    #[error("String already exists in the system")]
    Duplicate,

    /// No record exists for the requested value.
    #[error("String does not exist in the system")]
    NotFound,

    /// A structured filter parameter was malformed.
    #[error("Invalid value for {field} ({reason})")]
    Validation { field: String, reason: String },

    /// Natural-language text matched no interpretation rule.
    #[error("Unable to parse natural language query")]
    Unparseable,

    /// Natural-language text produced contradictory filters.
    #[error("Query parsed but resulted in conflicting filters: {0}")]
    Conflict(String),

    /// A built-in interpretation pattern failed to compile.
    #[error("Invalid interpretation pattern: {0}")]
    InvalidPattern(String),

    /// The record store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File or network I/O outside the record store failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl StrandError {
    /// Build a validation error for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
