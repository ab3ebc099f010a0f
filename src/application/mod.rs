//! Application layer services implementing business logic.
//!
//! Services consume the domain capabilities (store, code generator, clock,
//! geo-lookup) and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Shortening, stats and redirect resolution

pub mod services;
