//! Geo-lookup capability for click analytics.

use async_trait::async_trait;
use std::net::IpAddr;

/// Location string recorded when an address cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Resolves a client network address to an approximate location.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::MaxMindGeoLookup`] - local GeoLite2 database
/// - [`NoGeoLookup`] - resolves nothing
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Returns a human-readable location, or `None` if unresolvable.
    async fn lookup(&self, ip: IpAddr) -> Option<String>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}

/// Lookup used when no geo database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeoLookup;

#[async_trait]
impl GeoLookup for NoGeoLookup {
    async fn lookup(&self, _ip: IpAddr) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
