//! Access-code gate for the management endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::{error::AppError, state::AppState};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the shared access code.
pub const ACCESS_CODE_HEADER: &str = "x-access-code";

/// Key used to tag access codes before comparison.
const TAG_KEY: &[u8] = b"url-shortener/access-code";

/// Checks presented access codes against the configured one.
///
/// The expected code is kept only as an HMAC-SHA256 tag, and presented
/// codes are compared through [`Mac::verify_slice`], which runs in constant
/// time.
#[derive(Clone)]
pub struct AccessGate {
    expected_tag: Vec<u8>,
}

impl AccessGate {
    pub fn new(access_code: &str) -> Self {
        Self {
            expected_tag: tag(access_code).finalize().into_bytes().to_vec(),
        }
    }

    /// Returns true if `presented` equals the configured access code.
    pub fn verify(&self, presented: &str) -> bool {
        tag(presented).verify_slice(&self.expected_tag).is_ok()
    }
}

fn tag(code: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(TAG_KEY).expect("HMAC accepts any key length");
    mac.update(code.as_bytes());
    mac
}

/// Rejects requests without a valid `X-Access-Code` header.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, not valid UTF-8, or
/// does not match.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::access;
///
/// let protected = Router::new()
///     .route("/shorturls", get(stats_list_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), access::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Result<Response, AppError> {
    let authorized = req
        .headers()
        .get(ACCESS_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|code| st.access_gate.verify(code));

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "Invalid or missing access code");
        return Err(AppError::unauthorized(
            "Invalid or missing access code",
            json!({ "header": ACCESS_CODE_HEADER }),
        ));
    }

    Ok(next.run(req).await)
}
