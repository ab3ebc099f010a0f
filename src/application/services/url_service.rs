//! Short URL creation, statistics and redirect resolution.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::code_generator::{
    AlphanumericGenerator, CodeGenerator, DEFAULT_CODE_LENGTH, is_valid_code,
};
use crate::domain::entities::{ClickEvent, NewUrlRecord, UrlRecord};
use crate::domain::geo::{GeoLookup, UNKNOWN_LOCATION};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

/// Tunables for code allocation and expiry.
#[derive(Debug, Clone)]
pub struct ShortenSettings {
    /// Length of generated codes.
    pub code_length: usize,
    /// How many generated codes to try before giving up.
    pub max_attempts: usize,
    /// Validity window applied when the caller gives none.
    pub default_validity_minutes: i64,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: 5,
            default_validity_minutes: 30,
        }
    }
}

/// Input for [`UrlService::shorten`].
#[derive(Debug, Clone, Default)]
pub struct ShortenRequest {
    pub original_url: String,
    /// Minutes until the link expires; `None` uses the configured default.
    pub validity_minutes: Option<i64>,
    /// Caller-chosen code. `None` and `Some("")` both mean "generate one".
    pub requested_code: Option<String>,
}

impl ShortenRequest {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.requested_code = Some(code.into());
        self
    }
}

/// Result of a successful [`UrlService::shorten`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub expiry_date: DateTime<Utc>,
}

/// Request metadata captured for a redirect.
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub referrer: Option<String>,
    pub client_ip: Option<IpAddr>,
}

/// Service for creating short URLs and resolving them.
///
/// All collaborators are injected. The service holds no mutable state of its
/// own; uniqueness and click atomicity are the store's responsibility.
pub struct UrlService {
    store: Arc<dyn UrlStore>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    settings: ShortenSettings,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        store: Arc<dyn UrlStore>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        settings: ShortenSettings,
    ) -> Self {
        Self {
            store,
            generator,
            clock,
            settings,
        }
    }

    /// Creates a service with the random generator, the system clock and
    /// default settings.
    pub fn with_store(store: Arc<dyn UrlStore>) -> Self {
        Self::new(
            store,
            Arc::new(AlphanumericGenerator),
            Arc::new(SystemClock),
            ShortenSettings::default(),
        )
    }

    pub fn settings(&self) -> &ShortenSettings {
        &self.settings
    }

    /// Direct access to the underlying store, used by health checks.
    pub fn store(&self) -> &Arc<dyn UrlStore> {
        &self.store
    }

    /// Creates a short URL.
    ///
    /// Input is validated before the store is touched, in this order: URL,
    /// requested code, validity.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not a well-formed absolute URL
    /// - [`AppError::InvalidShortcode`] if the requested code is not alphanumeric
    /// - [`AppError::InvalidValidity`] if the validity is not positive
    /// - [`AppError::CodeConflict`] if the requested code is taken
    /// - [`AppError::ExhaustedRetries`] if every generated code collided
    /// - [`AppError::StoreUnavailable`] on store failures
    pub async fn shorten(&self, request: ShortenRequest) -> Result<ShortenedUrl, AppError> {
        let ShortenRequest {
            original_url,
            validity_minutes,
            requested_code,
        } = request;

        let original_url = normalize_url(&original_url)?;

        let requested_code = requested_code.filter(|code| !code.is_empty());
        if let Some(code) = &requested_code
            && !is_valid_code(code)
        {
            return Err(AppError::invalid_shortcode(
                "Shortcode must be alphanumeric",
                json!({ "code": code }),
            ));
        }

        let minutes = validity_minutes.unwrap_or(self.settings.default_validity_minutes);
        let window = validity_window(minutes)?;

        let created_at = self.clock.now();
        let expiry_date = created_at.checked_add_signed(window).ok_or_else(|| {
            AppError::invalid_validity(
                "Validity is out of range",
                json!({ "validity": minutes }),
            )
        })?;

        let record = match requested_code {
            Some(code) => {
                self.create_with_requested_code(code, original_url, created_at, expiry_date)
                    .await?
            }
            None => {
                self.create_with_generated_code(original_url, created_at, expiry_date)
                    .await?
            }
        };

        info!(
            short_code = %record.short_code,
            expiry = %record.expiry_date,
            "Short URL created"
        );

        Ok(ShortenedUrl {
            short_code: record.short_code,
            expiry_date: record.expiry_date,
        })
    }

    /// Returns a record with its full click log. Expired records are included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn get_stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.store
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Returns every record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn list_stats(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.store.list_all().await
    }

    /// Resolves a short code to its original URL and records the visit.
    ///
    /// An expired record is reported as [`AppError::Expired`] and no click is
    /// recorded for it.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record has this code
    /// - [`AppError::Expired`] if the validity window has passed
    /// - [`AppError::StoreUnavailable`] on store failures
    pub async fn resolve(
        &self,
        code: &str,
        visit: Visit,
        geo: &dyn GeoLookup,
    ) -> Result<String, AppError> {
        let record = self.get_stats(code).await?;

        let now = self.clock.now();
        if record.is_expired_at(now) {
            debug!(short_code = %code, "URL has expired");
            return Err(AppError::expired(
                "URL has expired",
                json!({ "code": code, "expiry_date": record.expiry_date }),
            ));
        }

        let location = match visit.client_ip {
            Some(ip) => geo.lookup(ip).await,
            None => None,
        }
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        let click = ClickEvent::new(now, visit.referrer, location);
        self.store.append_click(code, click).await?;

        info!(short_code = %code, "URL accessed");

        Ok(record.original_url)
    }

    async fn create_with_requested_code(
        &self,
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
    ) -> Result<UrlRecord, AppError> {
        if self.store.find_by_code(&code).await?.is_some() {
            return Err(code_conflict(&code));
        }

        let new_record = NewUrlRecord {
            short_code: code.clone(),
            original_url,
            created_at,
            expiry_date,
        };

        // A concurrent create can still win between the lookup and the insert.
        match self.store.create(new_record).await {
            Err(AppError::DuplicateKey { .. }) => Err(code_conflict(&code)),
            other => other,
        }
    }

    async fn create_with_generated_code(
        &self,
        original_url: String,
        created_at: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
    ) -> Result<UrlRecord, AppError> {
        let attempts = self.settings.max_attempts;

        for attempt in 1..=attempts {
            let new_record = NewUrlRecord {
                short_code: self.generator.generate(self.settings.code_length),
                original_url: original_url.clone(),
                created_at,
                expiry_date,
            };
            let code = new_record.short_code.clone();

            match self.store.create(new_record).await {
                Err(AppError::DuplicateKey { .. }) => {
                    warn!(
                        short_code = %code,
                        attempt,
                        max_attempts = attempts,
                        "Generated short code collided"
                    );
                }
                other => return other,
            }
        }

        Err(AppError::exhausted_retries(
            "Failed to generate unique code",
            json!({ "attempts": attempts }),
        ))
    }
}

/// Parses the URL and returns the form to store and redirect to.
///
/// Input made only of visible ASCII is kept as given. Anything else (tabs,
/// newlines, spaces, non-ASCII) is replaced by the parser's serialization,
/// which is always a valid `Location` header value.
fn normalize_url(original_url: &str) -> Result<String, AppError> {
    let parsed = url::Url::parse(original_url).map_err(|e| {
        AppError::invalid_url(
            "Invalid URL format",
            json!({ "url": original_url, "reason": e.to_string() }),
        )
    })?;

    if original_url.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(original_url.to_string())
    } else {
        Ok(String::from(parsed))
    }
}

fn validity_window(minutes: i64) -> Result<Duration, AppError> {
    if minutes <= 0 {
        return Err(AppError::invalid_validity(
            "Validity must be a positive number of minutes",
            json!({ "validity": minutes }),
        ));
    }

    Duration::try_minutes(minutes).ok_or_else(|| {
        AppError::invalid_validity("Validity is out of range", json!({ "validity": minutes }))
    })
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}

fn code_conflict(code: &str) -> AppError {
    AppError::code_conflict("Shortcode already exists", json!({ "code": code }))
}
