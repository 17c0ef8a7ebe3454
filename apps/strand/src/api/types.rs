//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strand_core::{FilterPredicate, InterpretedQuery, Properties, StrandError, StringRecord};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Store status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub record_count: usize,
    pub backend: String,
}

// =============================================================================
// CREATE REQUEST
// =============================================================================

/// Pull the `value` field out of a create-request body.
///
/// An absent or `null` field is missing; any other non-string is the wrong
/// type. The empty string is a valid value.
pub fn extract_value(body: &Value) -> Result<&str, StrandError> {
    match body.get("value") {
        None | Some(Value::Null) => Err(StrandError::MissingField("value".to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(StrandError::InvalidType {
            field: "value".to_string(),
        }),
    }
}

// =============================================================================
// RECORD RESPONSE
// =============================================================================

/// A stored record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub value: String,
    pub properties: Properties,
    /// ISO-8601 UTC with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
    pub created_at: String,
}

impl From<&StringRecord> for RecordResponse {
    fn from(record: &StringRecord) -> Self {
        Self {
            id: record.id().to_string(),
            value: record.value().to_string(),
            properties: record.properties().clone(),
            created_at: record
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<StringRecord> for RecordResponse {
    fn from(record: StringRecord) -> Self {
        Self::from(&record)
    }
}

fn to_data(records: &[StringRecord]) -> Vec<RecordResponse> {
    records.iter().map(RecordResponse::from).collect()
}

// =============================================================================
// LIST RESPONSES
// =============================================================================

/// Structured filter listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<RecordResponse>,
    pub count: usize,
    pub filters_applied: FilterPredicate,
}

impl ListResponse {
    pub fn new(records: &[StringRecord], filters_applied: FilterPredicate) -> Self {
        Self {
            data: to_data(records),
            count: records.len(),
            filters_applied,
        }
    }
}

/// The interpretation echoed back with a natural-language listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretedQueryJson {
    pub original: String,
    pub parsed_filters: FilterPredicate,
}

impl From<InterpretedQuery> for InterpretedQueryJson {
    fn from(query: InterpretedQuery) -> Self {
        Self {
            original: query.original,
            parsed_filters: query.parsed_filters,
        }
    }
}

/// Natural-language filter listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<RecordResponse>,
    pub count: usize,
    pub interpreted_query: InterpretedQueryJson,
}

impl NaturalLanguageResponse {
    pub fn new(records: &[StringRecord], query: InterpretedQuery) -> Self {
        Self {
            data: to_data(records),
            count: records.len(),
            interpreted_query: query.into(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
