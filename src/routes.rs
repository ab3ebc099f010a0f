//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortcode}` - Short link redirect (public)
//! - `GET  /health`      - Health check (public)
//! - `/shorturls*`       - Creation and statistics (access code required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Cross-origin access, preflights answered before the gate
//! - **Access gate** - `X-Access-Code` header check on management routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{access, cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}

/// Routes and middleware without path normalization.
///
/// Tests mount this directly so they can add layers of their own.
pub fn api_router(state: AppState) -> Router {
    let cors = cors::layer(&state.cors_origins);

    let management = api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), access::layer),
    );

    Router::new()
        .route("/health", get(health_handler))
        .route("/{shortcode}", get(redirect_handler))
        .merge(management)
        .with_state(state)
        .layer(cors)
        .layer(tracing::layer())
}
