//! Configuration data models
//!
//! This module defines all configuration structures used by sheet-sync.

pub mod flipkart;
pub mod http;
pub mod jobs;
pub mod shopify;

pub use flipkart::*;
pub use http::*;
pub use jobs::*;
pub use shopify::*;

/// Default workbook path
pub fn default_workbook() -> std::path::PathBuf {
    std::path::PathBuf::from("workbook.json")
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default Flipkart API base
pub fn default_flipkart_api_base() -> String {
    "https://api.flipkart.net".to_string()
}

/// Default Shopify Admin API version
pub fn default_shopify_api_version() -> String {
    "2023-10".to_string()
}

/// Default marker written when a lookup finds nothing
pub fn default_not_found_sentinel() -> String {
    "NOT FOUND".to_string()
}

/// Default pause between listing rows in milliseconds
pub fn default_row_delay_ms() -> u64 {
    600
}

/// Default pause after a failed attempt in milliseconds
pub fn default_retry_delay_ms() -> u64 {
    5000
}

/// Default attempts for row-level updates
pub fn default_max_attempts() -> u32 {
    1
}
