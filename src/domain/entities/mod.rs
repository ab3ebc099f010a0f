//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A shortening mapping together with its click log
//! - [`ClickEvent`] - A single recorded visit to a short code
//!
//! Creation input is kept in a separate struct ([`NewUrlRecord`]) so the
//! store, not the caller, decides what a freshly stored record looks like.

pub mod click;
pub mod url_record;

pub use click::ClickEvent;
pub use url_record::{NewUrlRecord, UrlRecord};
