//! Application error type shared by every layer.
//!
//! Each variant is one caller-visible error kind. Handlers return
//! [`AppError`] directly; the [`IntoResponse`] impl maps the kind to an HTTP
//! status and a JSON body of the form:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "URL not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL is not a well-formed absolute URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// A caller-requested short code is not alphanumeric.
    #[error("{message}")]
    InvalidShortcode { message: String, details: Value },

    /// The validity window is zero, negative or out of range.
    #[error("{message}")]
    InvalidValidity { message: String, details: Value },

    /// A caller-requested short code is already taken.
    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    /// The store rejected an insert because the short code exists.
    ///
    /// Raised by stores and absorbed by the service's retry loop.
    #[error("{message}")]
    DuplicateKey { message: String, details: Value },

    /// Every generated code collided.
    #[error("{message}")]
    ExhaustedRetries { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The record exists but its validity window has passed.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// The persistence layer failed.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    /// Missing or wrong access code.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_shortcode(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidShortcode {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_validity(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidValidity {
            message: message.into(),
            details,
        }
    }

    pub fn code_conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_key(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateKey {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted_retries(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedRetries {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidShortcode { .. } => "invalid_shortcode",
            Self::InvalidValidity { .. } => "invalid_validity",
            Self::CodeConflict { .. } => "code_conflict",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::ExhaustedRetries { .. } => "exhausted_retries",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::StoreUnavailable { .. } => "store_unavailable",
            Self::Unauthorized { .. } => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidShortcode { .. } | Self::InvalidValidity { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::CodeConflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::DuplicateKey { .. }
            | Self::ExhaustedRetries { .. }
            | Self::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn parts(&self) -> (&str, &Value) {
        match self {
            Self::InvalidUrl { message, details }
            | Self::InvalidShortcode { message, details }
            | Self::InvalidValidity { message, details }
            | Self::CodeConflict { message, details }
            | Self::DuplicateKey { message, details }
            | Self::ExhaustedRetries { message, details }
            | Self::NotFound { message, details }
            | Self::Expired { message, details }
            | Self::StoreUnavailable { message, details }
            | Self::Unauthorized { message, details } => (message, details),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = self.parts();
        ErrorInfo {
            code: self.code(),
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut info = self.to_error_info();

        // Internal failures hide their details from clients.
        if status.is_server_error() {
            info.details = json!({});
        }

        let body = ErrorBody { error: info };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::duplicate_key(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}
