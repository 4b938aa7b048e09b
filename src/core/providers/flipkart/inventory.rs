//! Listing inventory lookup

use super::{parse_records, seller_endpoint};
use crate::config::FlipkartConfig;
use crate::core::batch::{BatchEndpoint, EndpointDescriptor, KeyedRecord};
use crate::storage::CellValue;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Path of the inventory endpoint
pub const INVENTORY_PATH: &str = "/sellers/listings/v3/get/inventory";

/// Inventory of one FSN at the configured location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetail {
    pub product_id: String,
    #[serde(default)]
    pub inventory: Option<f64>,
}

impl KeyedRecord for InventoryDetail {
    fn key(&self) -> &str {
        &self.product_id
    }

    // A listed FSN without a quantity holds no stock.
    fn value(&self) -> Option<CellValue> {
        Some(CellValue::Number(self.inventory.unwrap_or(0.0)))
    }
}

/// Resolves FSNs to available quantity
#[derive(Debug, Clone)]
pub struct InventoryEndpoint {
    descriptor: EndpointDescriptor,
    location_id: String,
}

impl InventoryEndpoint {
    pub fn new(config: &FlipkartConfig) -> Result<Self> {
        let location_id = config.require_location_id()?.to_string();
        Ok(Self {
            descriptor: seller_endpoint(config, INVENTORY_PATH)?,
            location_id,
        })
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }
}

impl BatchEndpoint for InventoryEndpoint {
    type Record = InventoryDetail;

    fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    fn payload(&self, keys: &[&str]) -> Value {
        json!({
            "productIds": keys,
            "locationId": self.location_id,
        })
    }

    fn records(&self, body: Value) -> Result<Vec<InventoryDetail>> {
        parse_records(body, "inventoryDetails")
    }
}
