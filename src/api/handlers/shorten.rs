//! Handler for short URL creation.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{CreateUrlRequest, CreateUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,          // optional, minutes
///   "shortcode": "promo2026" // optional, alphanumeric
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "https://sho.rt/promo2026",
///   "expiry": "2026-05-04T10:45:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL, shortcode or validity
/// - 409 if the requested shortcode is taken
/// - 500 if no unique code could be generated or the store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let shortened = state.url_service.shorten(payload.into()).await?;

    let response =
        CreateUrlResponse::new(&state.base_url, &shortened.short_code, shortened.expiry_date);

    Ok((StatusCode::CREATED, Json(response)))
}
