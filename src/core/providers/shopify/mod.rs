//! Shopify Admin API
//!
//! Per-row inventory and price updates, and location listing.

pub mod listing;
pub mod locations;

pub use listing::{ListingSync, ListingUpdate};
pub use locations::{Location, list_locations};

use crate::config::ShopifyStoreConfig;
use crate::core::batch::{AuthHeader, EndpointDescriptor, HttpMethod};
use crate::utils::error::Result;
use crate::utils::net::ClientUtils;

/// Header carrying the Admin API token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

pub(crate) fn admin_auth(store: &ShopifyStoreConfig) -> Result<AuthHeader> {
    Ok(AuthHeader::Header {
        name: ACCESS_TOKEN_HEADER.to_string(),
        value: store.require_access_token()?.to_string(),
    })
}

/// Endpoint under the store's versioned Admin API root
pub(crate) fn admin_endpoint(
    store: &ShopifyStoreConfig,
    auth: &AuthHeader,
    path: &str,
    method: HttpMethod,
) -> Result<EndpointDescriptor> {
    let url = ClientUtils::add_path_to_api_base(&store.admin_base(), path);
    ClientUtils::validate_url(&url)?;
    Ok(EndpointDescriptor::new(url, method, auth.clone()))
}
