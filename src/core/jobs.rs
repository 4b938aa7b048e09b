//! Ready-made jobs wired from configuration

use crate::config::Config;
use crate::core::batch::{CompletionNotifier, RemoteCallExecutor, SyncDriver, SyncReport};
use crate::core::providers::flipkart::{InventoryEndpoint, SkuDetailsEndpoint};
use crate::core::providers::shopify::ListingSync;
use crate::storage::TabularStore;
use crate::utils::error::{Result, RetryPolicy};
use crate::utils::net::ClientUtils;

/// Job name of the SKU to FSN lookup
pub const FSN_LOOKUP_JOB: &str = "FSN lookup";
/// Job name of the inventory fetch
pub const INVENTORY_FETCH_JOB: &str = "Inventory fetch";

/// Executor sharing one HTTP client built from the `http` settings
pub fn executor(config: &Config) -> Result<RemoteCallExecutor> {
    let client = ClientUtils::create_http_client(&config.http.client_config())?;
    Ok(RemoteCallExecutor::new(client, RetryPolicy::single_attempt()))
}

/// SKU to FSN lookup on the configured sheet
pub fn fsn_lookup(
    config: &Config,
    executor: &RemoteCallExecutor,
) -> Result<SyncDriver<SkuDetailsEndpoint>> {
    SyncDriver::new(
        FSN_LOOKUP_JOB,
        SkuDetailsEndpoint::new(&config.flipkart)?,
        executor.clone(),
        config.jobs.fsn_lookup_settings(),
    )
}

/// FSN to quantity lookup; rows holding the FSN lookup's sentinel are ignored
pub fn inventory_fetch(
    config: &Config,
    executor: &RemoteCallExecutor,
) -> Result<SyncDriver<InventoryEndpoint>> {
    let mut settings = config.jobs.inventory_fetch_settings();
    let sentinel = config.jobs.fsn_lookup_settings().not_found_sentinel;
    if !settings.ignored_keys.contains(&sentinel) {
        settings.ignored_keys.push(sentinel);
    }

    SyncDriver::new(
        INVENTORY_FETCH_JOB,
        InventoryEndpoint::new(&config.flipkart)?,
        executor.clone(),
        settings,
    )
}

/// Inventory and price update for a named Shopify store
pub fn listing_update(
    config: &Config,
    executor: &RemoteCallExecutor,
    store: &str,
) -> Result<ListingSync> {
    let store = config.shopify_store(store)?;
    ListingSync::new(store, &config.jobs.listing_update, executor.clone())
}

/// FSN lookup followed by an inventory fetch over the refreshed sheet.
///
/// Both jobs are built before the first call, so missing credentials fail
/// the run up front. A single notification covers both.
pub async fn fsn_and_inventory<S: TabularStore + ?Sized>(
    config: &Config,
    executor: &RemoteCallExecutor,
    store: &mut S,
    notifier: &dyn CompletionNotifier,
) -> Result<(SyncReport, SyncReport)> {
    let lookup = fsn_lookup(config, executor)?;
    let fetch = inventory_fetch(config, executor)?;

    let lookup_report = lookup.sync(&mut *store).await?;
    let fetch_report = fetch.sync(&mut *store).await?;

    notifier.notify(&format!(
        "{}\n{}",
        lookup_report.summary(),
        fetch_report.summary()
    ));
    Ok((lookup_report, fetch_report))
}
