//! API layer - HTTP entry points.

pub mod error_sanitizer;
pub mod http;
