//! Flipkart Seller API configuration

use super::*;
use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};

/// Flipkart Seller API credentials and location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipkartConfig {
    /// API base URL
    #[serde(default = "default_flipkart_api_base")]
    pub api_base: String,
    /// OAuth application id
    #[serde(default)]
    pub app_id: Option<String>,
    /// OAuth application secret
    #[serde(default)]
    pub app_secret: Option<String>,
    /// Bearer token for Seller API calls
    #[serde(default)]
    pub access_token: Option<String>,
    /// Warehouse location for inventory lookups
    #[serde(default)]
    pub location_id: Option<String>,
}

impl Default for FlipkartConfig {
    fn default() -> Self {
        Self {
            api_base: default_flipkart_api_base(),
            app_id: None,
            app_secret: None,
            access_token: None,
            location_id: None,
        }
    }
}

impl FlipkartConfig {
    /// Bearer token, or a configuration error when it is missing
    pub fn require_access_token(&self) -> Result<&str> {
        non_empty(&self.access_token).ok_or_else(|| {
            SyncError::Config(
                "Flipkart access token missing (set flipkart.access_token or FLIPKART_ACCESS_TOKEN)"
                    .to_string(),
            )
        })
    }

    /// Location id, or a configuration error when it is missing
    pub fn require_location_id(&self) -> Result<&str> {
        non_empty(&self.location_id).ok_or_else(|| {
            SyncError::Config(
                "Flipkart location id missing (set flipkart.location_id or FLIPKART_LOCATION_ID)"
                    .to_string(),
            )
        })
    }

    /// OAuth application id and secret
    pub fn require_app_credentials(&self) -> Result<(&str, &str)> {
        match (non_empty(&self.app_id), non_empty(&self.app_secret)) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(SyncError::Config(
                "Flipkart app id and secret are required to fetch a token".to_string(),
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
