//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the capabilities defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL store
//! - [`memory`] - In-process store for development and tests
//! - [`geoip`] - MaxMind GeoLite2 geo-lookup

pub mod geoip;
pub mod memory;
pub mod persistence;
