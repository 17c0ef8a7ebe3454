//! # Authentication Module
//!
//! Optional API key authentication for the Strand HTTP API.
//!
//! ## Configuration
//!
//! - `STRAND_API_KEY`: If set, all requests except `/health` require this key
//!
//! ## Usage
//!
//! ```text
//! Authorization: Bearer <your-api-key>
//! ```
//!
//! The raw key without the `Bearer ` prefix is accepted as well.

use super::error::ApiError;
use axum::{
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

// =============================================================================
// API KEY AUTHENTICATION
// =============================================================================

/// Get API key from environment variable.
///
/// Returns `Some(key)` if `STRAND_API_KEY` is set and non-empty,
/// `None` otherwise (authentication disabled).
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var("STRAND_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Compare two keys in time independent of where they first differ.
///
/// Both sides are padded to the same length so `ct_eq` always runs over the
/// same number of bytes.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    let max_len = provided.len().max(expected.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided.len()].copy_from_slice(provided);
    padded_expected[..expected.len()].copy_from_slice(expected);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided.len() == expected.len()
}

/// API key authentication middleware.
pub async fn api_key_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = get_api_key_from_env() else {
        return Ok(next.run(request).await);
    };

    // Load balancers probe /health without credentials.
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = auth_header else {
        tracing::warn!(
            event = "auth_failure",
            reason = "missing_authorization_header",
            "Missing Authorization header"
        );
        return Err(ApiError::unauthorized());
    };

    let provided = header_value.strip_prefix("Bearer ").unwrap_or(header_value);
    if keys_match(provided.as_bytes(), expected.as_bytes()) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            event = "auth_failure",
            reason = "invalid_api_key",
            "Authentication failed: invalid API key"
        );
        Err(ApiError::unauthorized())
    }
}

// =============================================================================
// TESTS
// =============================================================================
