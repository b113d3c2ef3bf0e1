//! Utility modules supporting fetch operations.
//!
//! - [`HttpClient`]: shared reqwest client built from [`crate::config::HttpConfig`]

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
