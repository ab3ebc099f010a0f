//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::application::services::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}` (public, no access code)
///
/// # Request Flow
///
/// 1. Determine the client address (peer, or proxy headers when configured)
/// 2. Resolve the code; the service checks expiry and records the click
/// 3. Return `302 Found` with `Location` set to the original URL
///
/// # Errors
///
/// - 404 Not Found if the short code doesn't exist
/// - 410 Gone if the link has expired
pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let visit = Visit {
        referrer: headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        client_ip: Some(client_ip(&headers, addr, state.behind_proxy)),
    };

    let original_url = state
        .url_service
        .resolve(&shortcode, visit, state.geo.as_ref())
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
