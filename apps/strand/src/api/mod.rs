//! # Strand HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /strings` - Analyze and store a string
//! - `GET /strings` - List strings matching structured filters
//! - `GET /strings/filter-by-natural-language?query=` - List strings matching a phrase
//! - `GET /strings/{string_value}` - Fetch one string
//! - `DELETE /strings/{string_value}` - Delete one string
//! - `GET /status` - Record count and backend
//! - `GET /health` - Health check
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `STRAND_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `STRAND_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `STRAND_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod error;
mod handlers;
mod middleware;
mod types;

pub use auth::get_api_key_from_env;
pub use error::ApiError;
pub use middleware::{DEFAULT_RATE_LIMIT, create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ErrorResponse, HealthResponse, InterpretedQueryJson, ListResponse, NaturalLanguageResponse,
    RecordResponse, StatusResponse, extract_value,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use std::sync::Arc;
use strand_core::{Analyzer, Interpreter, StrandError};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The analyzer and its record store.
    pub analyzer: Arc<RwLock<Analyzer>>,
    /// Compiled natural-language rules, shared read-only.
    pub interpreter: Arc<Interpreter>,
}

impl AppState {
    /// Create app state around an analyzer.
    pub fn new(analyzer: Analyzer) -> Result<Self, StrandError> {
        Ok(Self {
            analyzer: Arc::new(RwLock::new(analyzer)),
            interpreter: Arc::new(Interpreter::new()?),
        })
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

/// Build CORS layer from `STRAND_CORS_ORIGINS`.
///
/// - `*`: allow all origins
/// - unset, or no valid origin in the list: localhost only
/// - otherwise: the comma-separated origins
fn build_cors_layer() -> CorsLayer {
    match std::env::var("STRAND_CORS_ORIGINS").ok().as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (STRAND_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in STRAND_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                cors_for(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No STRAND_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CORS_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    cors_for(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible. \
             Set STRAND_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route(
            "/strings",
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(handlers::natural_language_handler),
        )
        .route(
            "/strings/{string_value}",
            get(handlers::get_handler).delete(handlers::delete_handler),
        );

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, analyzer: Analyzer) -> Result<(), StrandError> {
    let state = AppState::new(analyzer)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StrandError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Strand HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StrandError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
