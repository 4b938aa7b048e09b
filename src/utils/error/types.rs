//! Error types for sheet-sync

use thiserror::Error;

/// Result type alias for sheet-sync
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for sheet-sync
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration errors (missing credentials, unknown store, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A setting that makes a run impossible, e.g. a zero batch size
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Network or timeout failure before a response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote API answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, truncated for logging
        body: String,
    },

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// All attempts for one batch failed
    #[error("Batch failed after {attempts} attempt(s): {reason}")]
    BatchFailed {
        /// Attempts made before giving up
        attempts: u32,
        /// Display form of the last error
        reason: String,
    },

    /// Named sheet does not exist in the workbook
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// Tabular store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SyncError {
    /// Build an HTTP error, keeping at most 512 bytes of the body
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
            body.push_str("...");
        }
        Self::Http { status, body }
    }

    /// Whether another attempt at the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::Transport(_) | SyncError::Http { .. } | SyncError::Parse(_)
        )
    }

    /// Whether this error must stop the process instead of a single batch or row
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Config(_)
                | SyncError::InvalidConfiguration(_)
                | SyncError::SheetNotFound(_)
                | SyncError::Yaml(_)
        )
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            SyncError::http(status.as_u16(), err.to_string())
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}
