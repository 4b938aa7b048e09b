//! Configuration loading utilities
//!
//! Environment variables override values read from the config file.

use super::Config;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::debug;

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        let vars: HashMap<String, String> = env::vars().collect();
        self.apply_env_from(|key| vars.get(key).cloned());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup("SHEET_SYNC_WORKBOOK") {
            self.workbook = PathBuf::from(path);
        }

        let flipkart = &mut self.flipkart;
        if let Some(base) = lookup("FLIPKART_API_BASE") {
            flipkart.api_base = base;
        }
        if let Some(id) = lookup("FLIPKART_APP_ID") {
            flipkart.app_id = Some(id);
        }
        if let Some(secret) = lookup("FLIPKART_APP_SECRET") {
            flipkart.app_secret = Some(secret);
        }
        if let Some(token) = lookup("FLIPKART_ACCESS_TOKEN") {
            flipkart.access_token = Some(token);
        }
        if let Some(location) = lookup("FLIPKART_LOCATION_ID") {
            flipkart.location_id = Some(location);
        }

        // SHOPIFY_<STORE>_ACCESS_TOKEN / SHOPIFY_<STORE>_LOCATION_ID
        for store in &mut self.shopify {
            let prefix = store.env_prefix();
            if let Some(token) = lookup(&format!("SHOPIFY_{}_ACCESS_TOKEN", prefix)) {
                store.access_token = Some(token);
            }
            if let Some(location) = lookup(&format!("SHOPIFY_{}_LOCATION_ID", prefix)) {
                store.location_id = Some(location);
            }
        }

        debug!("Applied environment overrides");
    }
}
