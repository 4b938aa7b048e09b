//! Store locations

use super::{admin_auth, admin_endpoint};
use crate::config::ShopifyStoreConfig;
use crate::core::batch::{HttpMethod, RemoteCallExecutor};
use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};

/// Inventory location of a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    locations: Vec<Location>,
}

/// List the store's locations, used to find the `location_id` to configure
pub async fn list_locations(
    executor: &RemoteCallExecutor,
    store: &ShopifyStoreConfig,
) -> Result<Vec<Location>> {
    let auth = admin_auth(store)?;
    let endpoint = admin_endpoint(store, &auth, "locations.json", HttpMethod::Get)?;

    let body = executor
        .request(&endpoint, None)
        .await
        .map_err(|exhausted| exhausted.last_error)?;
    let response: LocationsResponse = serde_json::from_value(body)
        .map_err(|e| SyncError::Parse(format!("Unexpected locations response: {}", e)))?;
    Ok(response.locations)
}
