//! Error handling utilities
//!
//! The crate-wide error type and the fixed-delay retry policy used at the
//! batch boundary.

mod retry;
mod types;

pub use retry::{Exhausted, RetryConfig, RetryPolicy};
pub use types::{Result, SyncError};
