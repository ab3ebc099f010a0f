//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire.

pub mod health;
pub mod shorten;
pub mod stats;
