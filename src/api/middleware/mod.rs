//! HTTP middleware for request processing and protection.
//!
//! Provides the access-code gate, CORS and request tracing.

pub mod access;
pub mod cors;
pub mod tracing;
