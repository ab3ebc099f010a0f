//! Handler for statistics of every short URL.

use axum::{Json, extract::State};

use crate::api::dto::stats::UrlStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists statistics for all short URLs in creation order.
///
/// # Endpoint
///
/// `GET /shorturls`
pub async fn stats_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlStatsResponse>>, AppError> {
    let records = state.url_service.list_stats().await?;

    tracing::debug!(count = records.len(), "All URL statistics retrieved");

    Ok(Json(records.into_iter().map(UrlStatsResponse::from).collect()))
}
