//! Shopify store configuration

use super::*;
use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};

/// One Shopify storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyStoreConfig {
    /// Store name used on the command line
    pub name: String,
    /// Shop domain, e.g. `puretreefoods.myshopify.com`
    pub shop_domain: String,
    /// Admin API access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Location whose inventory level is set
    #[serde(default)]
    pub location_id: Option<String>,
    /// Admin API version
    #[serde(default = "default_shopify_api_version")]
    pub api_version: String,
    /// Scheme and host override, e.g. a local mock server
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sheet holding this store's listings; defaults to the store name
    #[serde(default)]
    pub sheet: Option<String>,
}

impl ShopifyStoreConfig {
    pub fn new(name: impl Into<String>, shop_domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shop_domain: shop_domain.into(),
            access_token: None,
            location_id: None,
            api_version: default_shopify_api_version(),
            base_url: None,
            sheet: None,
        }
    }

    /// Admin API root, e.g. `https://shop.example/admin/api/2023-10`
    pub fn admin_base(&self) -> String {
        let origin = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.shop_domain),
        };
        format!("{}/admin/api/{}", origin, self.api_version)
    }

    pub fn sheet_name(&self) -> &str {
        self.sheet.as_deref().unwrap_or(&self.name)
    }

    pub fn require_access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                SyncError::Config(format!(
                    "Shopify access token missing for store '{}' (set SHOPIFY_{}_ACCESS_TOKEN)",
                    self.name,
                    self.env_prefix()
                ))
            })
    }

    /// Numeric location id
    pub fn require_location_id(&self) -> Result<u64> {
        let raw = self
            .location_id
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                SyncError::Config(format!(
                    "Shopify location id missing for store '{}'",
                    self.name
                ))
            })?;
        raw.parse().map_err(|_| {
            SyncError::Config(format!(
                "Shopify location id '{}' for store '{}' is not numeric",
                raw, self.name
            ))
        })
    }

    /// Upper-cased store name used in environment variable names
    pub fn env_prefix(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}
