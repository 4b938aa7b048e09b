//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{Result, SyncError};
use crate::utils::net::ClientUtils;
use std::collections::HashSet;
use tracing::debug;

/// Trait for configuration validation
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for HttpSettings {
    fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(SyncError::Config(
                "HTTP timeout must be greater than 0".to_string(),
            ));
        }
        if self.timeout > 600 {
            return Err(SyncError::Config(
                "HTTP timeout should not exceed 10 minutes".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for FlipkartConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating Flipkart configuration");
        ClientUtils::validate_url(&self.api_base)
            .map_err(|e| SyncError::Config(format!("flipkart.api_base: {}", e)))
    }
}

impl Validate for ShopifyStoreConfig {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SyncError::Config(
                "Shopify store name cannot be empty".to_string(),
            ));
        }
        if self.shop_domain.trim().is_empty() || self.shop_domain.contains('/') {
            return Err(SyncError::Config(format!(
                "Shopify store '{}' has an invalid shop_domain '{}'",
                self.name, self.shop_domain
            )));
        }
        if self.api_version.trim().is_empty() {
            return Err(SyncError::Config(format!(
                "Shopify store '{}' has an empty api_version",
                self.name
            )));
        }
        if let Some(base) = &self.base_url {
            ClientUtils::validate_url(base)?;
        }
        if self.location_id.is_some() {
            self.require_location_id()?;
        }
        Ok(())
    }
}

impl Validate for BatchJobSettings {
    fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SyncError::InvalidConfiguration(format!(
                "batch_size for sheet '{}' must be at least 1",
                self.sheet
            )));
        }
        if self.max_attempts == 0 {
            return Err(SyncError::InvalidConfiguration(format!(
                "max_attempts for sheet '{}' must be at least 1",
                self.sheet
            )));
        }
        if self.sheet.trim().is_empty() {
            return Err(SyncError::InvalidConfiguration(
                "sheet name cannot be empty".to_string(),
            ));
        }
        let layout = &self.layout;
        if layout.key_column == layout.value_column
            || layout.status_column == Some(layout.key_column)
            || layout.status_column == Some(layout.value_column)
        {
            return Err(SyncError::InvalidConfiguration(format!(
                "key, value and status columns of sheet '{}' must differ",
                self.sheet
            )));
        }
        Ok(())
    }
}

impl Validate for ListingJobConfig {
    fn validate(&self) -> Result<()> {
        let columns = self.columns.all();
        let distinct: HashSet<usize> = columns.iter().copied().collect();
        if distinct.len() != columns.len() {
            return Err(SyncError::InvalidConfiguration(
                "listing_update columns must all differ".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SyncError::InvalidConfiguration(
                "listing_update.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for JobsConfig {
    fn validate(&self) -> Result<()> {
        self.fsn_lookup_settings().validate()?;
        self.inventory_fetch_settings().validate()?;
        self.listing_update.validate()
    }
}
