//! SKU details lookup

use super::{parse_records, seller_endpoint};
use crate::config::FlipkartConfig;
use crate::core::batch::{BatchEndpoint, EndpointDescriptor, KeyedRecord};
use crate::storage::CellValue;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Path of the SKU details endpoint
pub const SKU_DETAILS_PATH: &str = "/sellers/skus/v2/details";

/// One entry of a SKU details response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDetails {
    pub sku_id: String,
    /// FSN of the listing
    #[serde(default)]
    pub product_id: Option<String>,
}

impl KeyedRecord for SkuDetails {
    fn key(&self) -> &str {
        &self.sku_id
    }

    fn value(&self) -> Option<CellValue> {
        self.product_id
            .as_deref()
            .map(str::trim)
            .filter(|fsn| !fsn.is_empty())
            .map(CellValue::from)
    }
}

/// Resolves SKUs to FSNs
#[derive(Debug, Clone)]
pub struct SkuDetailsEndpoint {
    descriptor: EndpointDescriptor,
}

impl SkuDetailsEndpoint {
    pub fn new(config: &FlipkartConfig) -> Result<Self> {
        Ok(Self {
            descriptor: seller_endpoint(config, SKU_DETAILS_PATH)?,
        })
    }
}

impl BatchEndpoint for SkuDetailsEndpoint {
    type Record = SkuDetails;

    fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    fn payload(&self, keys: &[&str]) -> Value {
        json!({ "skuIds": keys })
    }

    fn records(&self, body: Value) -> Result<Vec<SkuDetails>> {
        parse_records(body, "responses")
    }
}
