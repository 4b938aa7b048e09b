//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the CLI.

use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(SyncError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Build the filter from `RUST_LOG`, falling back to `default_directive`
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init_tracing(format: LogFormat, default_directive: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .with_thread_ids(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| SyncError::Config(format!("Failed to initialize logging: {}", e)))
}
