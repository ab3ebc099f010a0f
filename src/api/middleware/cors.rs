//! Cross-origin access for browser clients.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::access::ACCESS_CODE_HEADER;

/// Creates the CORS layer.
///
/// An empty `allowed_origins` list allows any origin. Preflight requests are
/// answered here, before the access gate runs.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ACCESS_CODE_HEADER),
        ])
}
