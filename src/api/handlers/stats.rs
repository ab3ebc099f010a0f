//! Handler for single URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::UrlStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics and the full click log for one short code.
///
/// # Endpoint
///
/// `GET /shorturls/{shortcode}`
///
/// Expired records are still reported.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let record = state.url_service.get_stats(&shortcode).await?;

    tracing::debug!(short_code = %shortcode, "URL statistics retrieved");

    Ok(Json(record.into()))
}
