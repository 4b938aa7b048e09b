//! Utility modules for sheet-sync
//!
//! - **error**: error type and fixed-delay retry
//! - **logging**: tracing subscriber setup
//! - **net**: HTTP client construction and URL helpers

pub mod error;
pub mod logging;
pub mod net;

pub use error::{Exhausted, RetryConfig, RetryPolicy, Result, SyncError};
pub use logging::{LogFormat, init_tracing};
pub use net::{ClientUtils, HttpClientConfig};

use uuid::Uuid;

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
