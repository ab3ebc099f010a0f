//! Helper functions used by the HTTP layer.
//!
//! - [`client_ip`] - Client address extraction from the socket peer and proxy headers

pub mod client_ip;
