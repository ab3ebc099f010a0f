//! MaxMind GeoLite2 implementation of [`GeoLookup`].

use async_trait::async_trait;
use maxminddb::Reader;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::trace;

use crate::domain::geo::GeoLookup;

/// Resolves addresses against a GeoLite2-City `.mmdb` file held in memory.
pub struct MaxMindGeoLookup {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindGeoLookup {
    /// Loads the database at `path`.
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoLookup for MaxMindGeoLookup {
    async fn lookup(&self, ip: IpAddr) -> Option<String> {
        let result = self.reader.lookup(ip).ok()?;
        let city: maxminddb::geoip2::City = result.decode().ok()??;

        let country = city.country.iso_code.map(String::from);
        // Subdivisions run from largest to smallest.
        let region = city
            .subdivisions
            .last()
            .and_then(|sub| sub.iso_code.or(sub.names.english))
            .map(String::from);
        let city_name = city.city.names.english.map(|s| s.to_string());

        trace!(
            "MaxMind lookup for {}: country={:?}, region={:?}, city={:?}",
            ip, country, region, city_name
        );

        format_location(country, region, city_name)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

/// Joins the known parts as `"<country>, <region>, <city>"`.
fn format_location(
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
) -> Option<String> {
    let parts: Vec<String> = [country, region, city]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
