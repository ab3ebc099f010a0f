//! Management route configuration.
//!
//! Every route here sits behind [`crate::api::middleware::access`].

use crate::api::handlers::{shorten_handler, stats_handler, stats_list_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes that require the access code.
///
/// # Endpoints
///
/// - `POST /shorturls`             - Create a short URL
/// - `GET  /shorturls`             - Statistics for all short URLs
/// - `GET  /shorturls/{shortcode}` - Statistics for one short URL
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", get(stats_list_handler).post(shorten_handler))
        .route("/shorturls/{shortcode}", get(stats_handler))
}
