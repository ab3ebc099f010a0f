//! DTOs for the short URL creation endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::ShortenRequest;

/// Request to create a short URL.
///
/// A missing `url` deserializes to an empty string so it is reported as an
/// invalid URL rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: String,

    /// Validity window in minutes. Fractions are truncated.
    pub validity: Option<f64>,

    /// Optional custom short code (alphanumeric).
    pub shortcode: Option<String>,
}

impl From<CreateUrlRequest> for ShortenRequest {
    fn from(request: CreateUrlRequest) -> Self {
        ShortenRequest {
            original_url: request.url,
            // `as` saturates, and the service rejects out-of-range windows.
            validity_minutes: request.validity.map(|minutes| minutes.trunc() as i64),
            requested_code: request.shortcode,
        }
    }
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_link: String,
    /// ISO-8601 expiry instant.
    pub expiry: String,
}

impl CreateUrlResponse {
    pub fn new(base_url: &str, short_code: &str, expiry_date: DateTime<Utc>) -> Self {
        Self {
            short_link: format!("{}/{}", base_url.trim_end_matches('/'), short_code),
            expiry: expiry_date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
