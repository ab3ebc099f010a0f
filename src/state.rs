//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::api::middleware::access::AccessGate;
use crate::application::services::UrlService;
use crate::domain::geo::GeoLookup;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub geo: Arc<dyn GeoLookup>,
    pub access_gate: Arc<AccessGate>,
    /// Prefix for composed short links, e.g. `https://sho.rt`.
    pub base_url: Arc<str>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for client addresses.
    pub behind_proxy: bool,
    /// Origins allowed by CORS; empty allows any origin.
    pub cors_origins: Vec<String>,
}
