//! Core sync functionality
//!
//! - **batch**: the batched remote sync pipeline and its driver
//! - **rate_limiter**: pacing between remote calls
//! - **providers**: Flipkart and Shopify endpoints
//! - **jobs**: jobs assembled from [`crate::config::Config`]

pub mod batch;
pub mod jobs;
pub mod providers;
pub mod rate_limiter;
