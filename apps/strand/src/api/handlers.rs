//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    error::ApiError,
    types::{
        HealthResponse, ListResponse, NaturalLanguageResponse, RecordResponse, StatusResponse,
        extract_value,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::BTreeMap;
use strand_core::{StrandError, build_structured_filter};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Record count and active backend.
pub async fn status_handler(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    let analyzer = state.analyzer.read().await;

    Ok(Json(StatusResponse {
        record_count: analyzer.count()?,
        backend: analyzer.backend_name().to_string(),
    }))
}

// =============================================================================
// CREATE HANDLER
// =============================================================================

/// Analyze and store a new string.
///
/// A body that is not JSON at all is treated like one missing `value`.
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected create body");
        StrandError::MissingField("value".to_string())
    })?;
    let value = extract_value(&body)?;

    let mut analyzer = state.analyzer.write().await;
    let record = analyzer.analyze(value)?;

    tracing::info!(id = %record.id(), length = record.properties().length, "String analyzed");
    Ok((StatusCode::CREATED, Json(record.into())))
}

// =============================================================================
// LOOKUP HANDLERS
// =============================================================================

/// Fetch the record for an exact value.
pub async fn get_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Path(string_value) = path?;
    let analyzer = state.analyzer.read().await;
    let record = analyzer.get(&string_value)?;
    Ok(Json(record.into()))
}

/// Delete the record for an exact value.
pub async fn delete_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(string_value) = path?;
    let mut analyzer = state.analyzer.write().await;
    let record = analyzer.delete(&string_value)?;

    tracing::info!(id = %record.id(), "String deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// FILTER HANDLERS
// =============================================================================

/// List records matching structured query parameters.
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<BTreeMap<String, String>>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(params) = query?;
    let filter = build_structured_filter(&params).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected structured filter");
    })?;

    let analyzer = state.analyzer.read().await;
    let records = analyzer.list(&filter)?;

    Ok(Json(ListResponse::new(&records, filter)))
}

/// List records matching a natural-language query.
pub async fn natural_language_handler(
    State(state): State<AppState>,
    query: Result<Query<BTreeMap<String, String>>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = query?;
    let text = params
        .get("query")
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter is required"))?;

    let interpreted = state.interpreter.interpret(text).inspect_err(|e| {
        tracing::debug!(query = %text, error = %e, "Rejected natural-language query");
    })?;

    let analyzer = state.analyzer.read().await;
    let records = analyzer.list(&interpreted.parsed_filters)?;

    Ok(Json(NaturalLanguageResponse::new(&records, interpreted)))
}
