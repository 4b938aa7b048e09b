//! # sheet-sync
//!
//! Batched synchronization between spreadsheet workbooks and marketplace
//! seller APIs.
//!
//! A run reads the rows of a sheet that still lack a value, sends their keys
//! to a remote API in fixed-size batches with bounded retry, matches the
//! answers back to their rows and writes the values (or a not-found
//! sentinel) into the same sheet. Rows that already hold a value are left
//! out, so running a job twice only redoes what is missing.
//!
//! ## Jobs
//!
//! - **FSN lookup**: Flipkart SKU to FSN
//! - **Inventory fetch**: Flipkart FSN to available quantity
//! - **Listing update**: Shopify inventory level and price, row by row
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet_sync::core::jobs;
//! use sheet_sync::{Config, WorkbookFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/sync.yaml").await?;
//!     let executor = jobs::executor(&config)?;
//!     let driver = jobs::fsn_lookup(&config, &executor)?;
//!
//!     let mut sheet = WorkbookFile::open(&config.workbook, &driver.settings().sheet).await?;
//!     let report = driver.run(&mut sheet).await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::batch::{
    BatchEndpoint, CompletionNotifier, KeyedRecord, RemoteCallExecutor, RowOutcome, SyncDriver,
    SyncReport, WorkItem,
};
pub use core::rate_limiter::RateLimiter;
pub use storage::{CellValue, MemorySheet, RowRef, TabularStore, WorkbookFile};
pub use utils::error::{Result, SyncError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (git {}, built {}, {})",
            self.version, self.git_hash, self.build_time, self.rust_version
        )
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
