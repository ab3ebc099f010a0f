//! Domain layer containing business entities and capabilities.
//!
//! Nothing here depends on the HTTP layer or on a concrete store.
//!
//! # Architecture
//!
//! - [`entities`] - URL records and click events
//! - [`repositories`] - Store trait implemented by the infrastructure layer
//! - [`code_generator`] - Short code generation and validation
//! - [`clock`] - Time source
//! - [`geo`] - Client address to location lookup
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::UrlService::resolve`] fetches the record and checks expiry
//! 3. A [`entities::ClickEvent`] is built from the referrer and [`geo::GeoLookup`]
//! 4. The click is appended through [`repositories::UrlStore::append_click`]

pub mod clock;
pub mod code_generator;
pub mod entities;
pub mod geo;
pub mod repositories;
