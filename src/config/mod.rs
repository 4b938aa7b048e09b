//! Configuration management for sheet-sync
//!
//! This module handles loading, validation, and management of all configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct, passed explicitly into every job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workbook file holding the sheets
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
    /// Flipkart Seller API
    #[serde(default)]
    pub flipkart: FlipkartConfig,
    /// Shopify storefronts
    #[serde(default)]
    pub shopify: Vec<ShopifyStoreConfig>,
    /// Job settings
    #[serde(default)]
    pub jobs: JobsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook: default_workbook(),
            http: HttpSettings::default(),
            flipkart: FlipkartConfig::default(),
            shopify: Vec::new(),
            jobs: JobsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| SyncError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise start from defaults; then
    /// apply environment overrides and validate.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?
        } else {
            info!("No config file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Look up a Shopify store by name, case-insensitively
    pub fn shopify_store(&self, name: &str) -> Result<&ShopifyStoreConfig> {
        self.shopify
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let known: Vec<&str> = self.shopify.iter().map(|s| s.name.as_str()).collect();
                SyncError::Config(format!(
                    "Unknown Shopify store '{}' (configured: {})",
                    name,
                    if known.is_empty() {
                        "none".to_string()
                    } else {
                        known.join(", ")
                    }
                ))
            })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.http.validate()?;
        self.flipkart.validate()?;

        let mut names = HashSet::new();
        for store in &self.shopify {
            store.validate()?;
            if !names.insert(store.name.to_ascii_lowercase()) {
                return Err(SyncError::Config(format!(
                    "Duplicate Shopify store name '{}'",
                    store.name
                )));
            }
        }

        self.jobs.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::Config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SyncError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }

    /// Copy with secrets replaced, for printing
    pub fn redacted(&self) -> Self {
        fn mask(value: &mut Option<String>) {
            if value.is_some() {
                *value = Some("********".to_string());
            }
        }

        let mut copy = self.clone();
        mask(&mut copy.flipkart.app_secret);
        mask(&mut copy.flipkart.access_token);
        for store in &mut copy.shopify {
            mask(&mut store.access_token);
        }
        copy
    }
}
