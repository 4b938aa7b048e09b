//! Network and client utilities
//!
//! Shared HTTP client construction and URL helpers.

pub mod client;

pub use client::{ClientUtils, HttpClientConfig};
