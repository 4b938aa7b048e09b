//! Inventory and price update, one row at a time
//!
//! Each valid row issues two calls: the inventory level is set at the
//! store's location, then the variant's price and MRP are updated. The
//! status column records which of the two went through. Rows whose status
//! already records a full success are left alone, so a rerun only retries
//! what failed.

use super::{admin_auth, admin_endpoint};
use crate::config::{ListingColumns, ListingJobConfig, ShopifyStoreConfig, Validate};
use crate::core::batch::{
    AuthHeader, CompletionNotifier, EndpointDescriptor, HttpMethod, LogNotifier,
    RemoteCallExecutor, RowOutcome, RunState, SyncReport, is_success_status, render_status,
    write_status,
};
use crate::core::rate_limiter::{FixedDelay, RateLimiter};
use crate::storage::{CellValue, TabularStore, column, data_rows};
use crate::utils::error::{Exhausted, Result, RetryConfig, RetryPolicy, SyncError};
use crate::utils::generate_run_id;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};

/// Validated update of one listing row
#[derive(Debug, Clone, PartialEq)]
pub struct ListingUpdate {
    pub inventory_item_id: u64,
    pub available: i64,
    /// Selling price as written in the sheet
    pub price: String,
    /// MRP as written in the sheet
    pub compare_at_price: String,
    pub variant_id: u64,
}

impl ListingUpdate {
    /// Validate the cells of one row.
    ///
    /// Missing fields are reported before malformed ones, and the MRP check
    /// runs last.
    pub fn from_row(
        cells: &[CellValue],
        columns: &ListingColumns,
    ) -> std::result::Result<Self, RowOutcome> {
        let inventory_item = column(cells, columns.inventory_item_id);
        let quantity = column(cells, columns.quantity);
        let price = column(cells, columns.price);
        let variant = column(cells, columns.variant_id);
        let mrp = column(cells, columns.compare_at_price);

        if [inventory_item, quantity, price, variant]
            .iter()
            .any(|cell| cell.is_blank())
        {
            return Err(RowOutcome::Invalid("Missing data".to_string()));
        }

        let invalid_number = || RowOutcome::Invalid("Invalid number".to_string());
        let inventory_item_id = inventory_item.as_u64().ok_or_else(invalid_number)?;
        let variant_id = variant.as_u64().ok_or_else(invalid_number)?;
        let available = quantity.as_i64().ok_or_else(invalid_number)?;
        let price_value = price.as_f64().ok_or_else(invalid_number)?;

        match mrp.as_f64() {
            Some(mrp_value) if mrp_value > price_value => {}
            _ => return Err(RowOutcome::Invalid("MRP missing or ≤ Price".to_string())),
        }

        Ok(Self {
            inventory_item_id,
            available,
            price: price.as_text(),
            compare_at_price: mrp.as_text(),
            variant_id,
        })
    }
}

/// Inventory and price update job for one store
pub struct ListingSync {
    store: ShopifyStoreConfig,
    auth: AuthHeader,
    location_id: u64,
    columns: ListingColumns,
    inventory_endpoint: EndpointDescriptor,
    executor: RemoteCallExecutor,
    limiter: Box<dyn RateLimiter>,
    notifier: Arc<dyn CompletionNotifier>,
}

impl ListingSync {
    /// Create the job; credentials and settings are checked here.
    pub fn new(
        store: &ShopifyStoreConfig,
        job: &ListingJobConfig,
        executor: RemoteCallExecutor,
    ) -> Result<Self> {
        job.validate()?;
        store.validate()?;
        let auth = admin_auth(store)?;
        let location_id = store.require_location_id()?;
        let inventory_endpoint =
            admin_endpoint(store, &auth, "inventory_levels/set.json", HttpMethod::Post)?;

        let executor = executor.with_retry(RetryPolicy::new(RetryConfig {
            max_attempts: job.max_attempts,
            delay: job.retry_delay(),
        }));

        Ok(Self {
            store: store.clone(),
            auth,
            location_id,
            columns: job.columns.clone(),
            inventory_endpoint,
            executor,
            limiter: Box::new(FixedDelay::new(job.row_delay())),
            notifier: Arc::new(LogNotifier),
        })
    }

    pub fn with_rate_limiter(mut self, limiter: Box<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sheet this store's listings live on
    pub fn sheet_name(&self) -> &str {
        self.store.sheet_name()
    }

    /// Run the job and send the completion notification
    pub async fn run<S: TabularStore + ?Sized>(&self, sheet: &mut S) -> Result<SyncReport> {
        let report = self.sync(sheet).await?;
        self.notifier.notify(&report.summary());
        Ok(report)
    }

    /// Process every data row without notifying
    pub async fn sync<S: TabularStore + ?Sized>(&self, sheet: &mut S) -> Result<SyncReport> {
        let run_id = generate_run_id();
        let span = info_span!(
            "listing_run",
            store = %self.store.name,
            run_id = %run_id,
            sheet = %sheet.name()
        );
        self.limiter.reset();

        async move {
            let job = format!("Listing update for {}", self.store.name);
            let mut report = SyncReport::new(job, run_id, sheet.name());
            report.state = RunState::BuildingWorklist;

            let grid = sheet.rows().await?;
            let status_column = self.columns.status;
            let rows: Vec<_> = data_rows(&grid)
                .filter(|(_, cells)| {
                    self.columns
                        .all()
                        .iter()
                        .any(|&c| !column(cells, c).is_blank())
                })
                .collect();
            let total = rows.len();

            for (position, (row, cells)) in rows.into_iter().enumerate() {
                report.state = RunState::ProcessingBatches {
                    index: position,
                    total,
                };

                if is_success_status(column(cells, status_column)) {
                    report.skipped += 1;
                    continue;
                }

                let outcome = match ListingUpdate::from_row(cells, &self.columns) {
                    Ok(update) => {
                        report.worklist += 1;
                        self.limiter.wait_before_next().await;
                        debug!("Updating {} (variant {})", row, update.variant_id);
                        self.apply(&update).await
                    }
                    Err(invalid) => {
                        warn!("Skipping {}: {}", row, render_status(&invalid));
                        invalid
                    }
                };

                write_status(sheet, row, status_column, &outcome).await?;
                sheet.flush().await?;
                report.record(&outcome);
            }

            report.finish();
            info!("{}", report.summary());
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Issue the inventory and price calls for one row
    pub async fn apply(&self, update: &ListingUpdate) -> RowOutcome {
        let inventory_payload = json!({
            "location_id": self.location_id,
            "inventory_item_id": update.inventory_item_id,
            "available": update.available,
        });
        let inventory = match self
            .call(&self.inventory_endpoint, &inventory_payload)
            .await
        {
            Ok(()) => true,
            Err(SubOperationError::Aborted(reason)) => {
                return RowOutcome::Failure(format!("Inventory Error: {}", reason));
            }
            Err(SubOperationError::Rejected(e)) => {
                warn!("Inventory update for item {} failed: {}", update.inventory_item_id, e);
                false
            }
        };

        let price_endpoint = match admin_endpoint(
            &self.store,
            &self.auth,
            &format!("variants/{}.json", update.variant_id),
            HttpMethod::Put,
        ) {
            Ok(endpoint) => endpoint,
            Err(e) => return RowOutcome::Failure(format!("Price Error: {}", e)),
        };
        let price_payload = json!({
            "variant": {
                "id": update.variant_id,
                "price": update.price,
                "compare_at_price": update.compare_at_price,
            }
        });
        let price = match self.call(&price_endpoint, &price_payload).await {
            Ok(()) => true,
            Err(SubOperationError::Aborted(reason)) => {
                return RowOutcome::Failure(format!("Price Error: {}", reason));
            }
            Err(SubOperationError::Rejected(e)) => {
                warn!("Price update for variant {} failed: {}", update.variant_id, e);
                false
            }
        };

        RowOutcome::from_sub_operations(inventory, price)
    }

    async fn call(
        &self,
        endpoint: &EndpointDescriptor,
        payload: &Value,
    ) -> std::result::Result<(), SubOperationError> {
        match self.executor.request(endpoint, Some(payload)).await {
            Ok(_) => Ok(()),
            Err(Exhausted {
                last_error: SyncError::Transport(reason),
                ..
            }) => Err(SubOperationError::Aborted(reason)),
            Err(exhausted) => Err(SubOperationError::Rejected(exhausted.last_error)),
        }
    }
}

/// Failure of one of the two calls of a row
enum SubOperationError {
    /// No response at all; the row stops here
    Aborted(String),
    /// The remote answered with an error
    Rejected(SyncError),
}
