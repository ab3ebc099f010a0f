//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall service health status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"degraded"`
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Individual component health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
    pub geoip: CheckStatus,
}

/// Health status of a single component.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `"ok"` or `"error"`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
