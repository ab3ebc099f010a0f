//! Repository trait definitions for the domain layer.
//!
//! The store contract lives here; concrete stores live in
//! `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`UrlStore`] - URL records and their click logs
//!
//! # Testing
//!
//! A `mockall` mock is generated under `cfg(test)`. See
//! `tests/repository_url.rs` for the PostgreSQL store.

pub mod url_store;

pub use url_store::UrlStore;

#[cfg(test)]
pub use url_store::MockUrlStore;
