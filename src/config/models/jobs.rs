//! Sync job configuration
//!
//! Batched lookups are configured with optional overrides that resolve
//! against per-job defaults, so a config file only lists what it changes.

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a not-found result does to a cell that already holds a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundPolicy {
    /// Always write the sentinel
    #[default]
    Overwrite,
    /// Write the sentinel only into empty cells
    FillEmpty,
}

/// How the driver paces successive batches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Sleep a fixed delay before every batch but the first
    #[default]
    FixedDelay,
    /// Token bucket allowing one batch per delay period
    TokenBucket,
    /// No pacing
    None,
}

/// Column offsets of a batched lookup, zero-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Column holding the lookup key
    pub key_column: usize,
    /// Column receiving the resolved value
    pub value_column: usize,
    /// Optional column receiving a status string
    #[serde(default)]
    pub status_column: Option<usize>,
}

/// Fully resolved settings of one batched lookup job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJobSettings {
    pub sheet: String,
    pub layout: SheetLayout,
    pub batch_size: usize,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub inter_batch_delay_ms: u64,
    pub rate_limit: RateLimitStrategy,
    pub not_found_sentinel: String,
    pub not_found_policy: NotFoundPolicy,
    /// Keys never sent to the remote, e.g. an upstream sentinel
    pub ignored_keys: Vec<String>,
}

impl BatchJobSettings {
    /// SKU to FSN lookup on the `fk` sheet
    pub fn fsn_lookup() -> Self {
        Self {
            sheet: "fk".to_string(),
            layout: SheetLayout {
                key_column: 0,
                value_column: 1,
                status_column: None,
            },
            batch_size: 20,
            max_attempts: 3,
            retry_delay_ms: default_retry_delay_ms(),
            inter_batch_delay_ms: 1000,
            rate_limit: RateLimitStrategy::FixedDelay,
            not_found_sentinel: default_not_found_sentinel(),
            not_found_policy: NotFoundPolicy::Overwrite,
            ignored_keys: Vec::new(),
        }
    }

    /// FSN to inventory quantity lookup on the `fk` sheet
    pub fn inventory_fetch() -> Self {
        Self {
            sheet: "fk".to_string(),
            layout: SheetLayout {
                key_column: 1,
                value_column: 2,
                status_column: None,
            },
            batch_size: 20,
            max_attempts: 1,
            retry_delay_ms: default_retry_delay_ms(),
            inter_batch_delay_ms: 1500,
            rate_limit: RateLimitStrategy::FixedDelay,
            not_found_sentinel: default_not_found_sentinel(),
            not_found_policy: NotFoundPolicy::Overwrite,
            ignored_keys: vec![default_not_found_sentinel()],
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }
}

/// Overrides for a batched lookup job, as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchJobConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_batch_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_found_sentinel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_found_policy: Option<NotFoundPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_keys: Option<Vec<String>>,
}

impl BatchJobConfig {
    /// Apply these overrides on top of `base`
    pub fn resolve(&self, base: BatchJobSettings) -> BatchJobSettings {
        BatchJobSettings {
            sheet: self.sheet.clone().unwrap_or(base.sheet),
            layout: SheetLayout {
                key_column: self.key_column.unwrap_or(base.layout.key_column),
                value_column: self.value_column.unwrap_or(base.layout.value_column),
                status_column: self.status_column.or(base.layout.status_column),
            },
            batch_size: self.batch_size.unwrap_or(base.batch_size),
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            retry_delay_ms: self.retry_delay_ms.unwrap_or(base.retry_delay_ms),
            inter_batch_delay_ms: self.inter_batch_delay_ms.unwrap_or(base.inter_batch_delay_ms),
            rate_limit: self.rate_limit.unwrap_or(base.rate_limit),
            not_found_sentinel: self
                .not_found_sentinel
                .clone()
                .unwrap_or(base.not_found_sentinel),
            not_found_policy: self.not_found_policy.unwrap_or(base.not_found_policy),
            ignored_keys: self.ignored_keys.clone().unwrap_or(base.ignored_keys),
        }
    }
}

/// Column offsets of a listing sheet, zero-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingColumns {
    pub sku: usize,
    pub inventory_item_id: usize,
    pub quantity: usize,
    pub price: usize,
    pub compare_at_price: usize,
    pub variant_id: usize,
    pub status: usize,
}

impl Default for ListingColumns {
    fn default() -> Self {
        Self {
            sku: 0,
            inventory_item_id: 1,
            quantity: 2,
            price: 3,
            compare_at_price: 4,
            variant_id: 5,
            status: 6,
        }
    }
}

impl ListingColumns {
    pub fn all(&self) -> [usize; 7] {
        [
            self.sku,
            self.inventory_item_id,
            self.quantity,
            self.price,
            self.compare_at_price,
            self.variant_id,
            self.status,
        ]
    }
}

/// Shopify inventory and price update job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingJobConfig {
    #[serde(default)]
    pub columns: ListingColumns,
    /// Pause between rows that issued remote calls
    #[serde(default = "default_row_delay_ms")]
    pub row_delay_ms: u64,
    /// Attempts per sub-operation
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ListingJobConfig {
    fn default() -> Self {
        Self {
            columns: ListingColumns::default(),
            row_delay_ms: default_row_delay_ms(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ListingJobConfig {
    pub fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// All job settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsConfig {
    #[serde(default)]
    pub fsn_lookup: BatchJobConfig,
    #[serde(default)]
    pub inventory_fetch: BatchJobConfig,
    #[serde(default)]
    pub listing_update: ListingJobConfig,
}

impl JobsConfig {
    pub fn fsn_lookup_settings(&self) -> BatchJobSettings {
        self.fsn_lookup.resolve(BatchJobSettings::fsn_lookup())
    }

    pub fn inventory_fetch_settings(&self) -> BatchJobSettings {
        self.inventory_fetch
            .resolve(BatchJobSettings::inventory_fetch())
    }
}
