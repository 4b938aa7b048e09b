//! Flipkart Seller API
//!
//! SKU to FSN lookup, inventory fetch and OAuth token retrieval.

pub mod inventory;
pub mod oauth;
pub mod skus;

pub use inventory::{InventoryDetail, InventoryEndpoint};
pub use oauth::{AccessToken, fetch_access_token, token_url};
pub use skus::{SkuDetails, SkuDetailsEndpoint};

use crate::config::FlipkartConfig;
use crate::core::batch::{AuthHeader, EndpointDescriptor, HttpMethod};
use crate::utils::error::{Result, SyncError};
use crate::utils::net::ClientUtils;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Bearer-authenticated POST endpoint under the configured API base
pub(crate) fn seller_endpoint(config: &FlipkartConfig, path: &str) -> Result<EndpointDescriptor> {
    let token = config.require_access_token()?;
    let url = ClientUtils::add_path_to_api_base(&config.api_base, path);
    ClientUtils::validate_url(&url)?;
    Ok(EndpointDescriptor::new(
        url,
        HttpMethod::Post,
        AuthHeader::Bearer(token.to_string()),
    ))
}

/// Decode the record array under `field`.
///
/// A missing or non-array field fails the whole response. A malformed entry
/// is logged and dropped so the rest of the batch still resolves.
pub(crate) fn parse_records<T: DeserializeOwned>(mut body: Value, field: &str) -> Result<Vec<T>> {
    let entries = match body.get_mut(field).map(Value::take) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(SyncError::Parse(format!(
                "Expected '{}' to be an array, got {}",
                field, other
            )));
        }
        None => {
            return Err(SyncError::Parse(format!("Response has no '{}' field", field)));
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Dropping malformed '{}' entry #{}: {}", field, position, e),
        }
    }
    Ok(records)
}
