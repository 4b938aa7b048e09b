//! Sync driver orchestrating a batched lookup run

use super::executor::{BatchEndpoint, RemoteCallExecutor};
use super::notify::{CompletionNotifier, LogNotifier};
use super::partition::partition;
use super::reconcile::reconcile;
use super::types::{RunState, SyncReport, WorkItem, is_success_status};
use super::writer::RowStatusWriter;
use crate::config::{BatchJobSettings, Validate};
use crate::core::rate_limiter::{self, RateLimiter};
use crate::storage::{CellValue, RowRef, TabularStore, column, data_rows};
use crate::utils::error::{Result, RetryConfig, RetryPolicy};
use crate::utils::generate_run_id;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Rows selected for remote resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worklist {
    pub items: Vec<WorkItem>,
    /// Key to originating row
    pub index: HashMap<String, RowRef>,
    /// Rows left out: already resolved, ignored or duplicate keys
    pub skipped: usize,
}

impl Worklist {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Runs one batched lookup job against a tabular store
pub struct SyncDriver<E: BatchEndpoint> {
    job: String,
    endpoint: E,
    executor: RemoteCallExecutor,
    settings: BatchJobSettings,
    writer: RowStatusWriter,
    limiter: Box<dyn RateLimiter>,
    notifier: Arc<dyn CompletionNotifier>,
}

impl<E: BatchEndpoint> SyncDriver<E> {
    /// Create a driver; invalid settings are rejected here, before any call.
    ///
    /// The executor's client is kept, its retry policy is replaced by the
    /// one the settings describe.
    pub fn new(
        job: impl Into<String>,
        endpoint: E,
        executor: RemoteCallExecutor,
        settings: BatchJobSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let executor = executor.with_retry(RetryPolicy::new(RetryConfig {
            max_attempts: settings.max_attempts,
            delay: settings.retry_delay(),
        }));
        let limiter =
            rate_limiter::from_settings(settings.rate_limit, settings.inter_batch_delay());

        Ok(Self {
            job: job.into(),
            endpoint,
            executor,
            writer: RowStatusWriter::from_settings(&settings),
            settings,
            limiter,
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

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn settings(&self) -> &BatchJobSettings {
        &self.settings
    }

    /// Select rows with a key and an empty value cell.
    ///
    /// The header, rows already marked successful, ignored keys and repeated
    /// keys are left out; the first row of a repeated key is kept.
    pub fn build_worklist(&self, grid: &[Vec<CellValue>]) -> Worklist {
        let layout = &self.settings.layout;
        let mut worklist = Worklist::default();

        for (row, cells) in data_rows(grid) {
            let key = column(cells, layout.key_column).as_text();
            if key.is_empty() {
                continue;
            }
            if !column(cells, layout.value_column).is_blank() {
                worklist.skipped += 1;
                continue;
            }
            if let Some(status_column) = layout.status_column {
                if is_success_status(column(cells, status_column)) {
                    worklist.skipped += 1;
                    continue;
                }
            }
            if self.settings.ignored_keys.contains(&key) {
                debug!("Ignoring key '{}' in {}", key, row);
                worklist.skipped += 1;
                continue;
            }

            match worklist.index.entry(key) {
                Entry::Occupied(first) => {
                    warn!(
                        "Duplicate key '{}' in {}, already queued from {}",
                        first.key(),
                        row,
                        first.get()
                    );
                    worklist.skipped += 1;
                }
                Entry::Vacant(slot) => {
                    worklist.items.push(WorkItem::new(slot.key().clone(), row));
                    slot.insert(row);
                }
            }
        }

        worklist
    }

    /// Run the job and send the completion notification
    pub async fn run<S: TabularStore + ?Sized>(&self, store: &mut S) -> Result<SyncReport> {
        let report = self.sync(store).await?;
        self.notifier.notify(&report.summary());
        Ok(report)
    }

    /// Run the job without notifying.
    ///
    /// Failed batches leave their rows untouched and do not stop the run.
    /// Storage errors do.
    pub async fn sync<S: TabularStore + ?Sized>(&self, store: &mut S) -> Result<SyncReport> {
        let run_id = generate_run_id();
        let span = info_span!("sync_run", job = %self.job, run_id = %run_id, sheet = %store.name());

        self.limiter.reset();

        async move {
            let mut report = SyncReport::new(&self.job, run_id, store.name());
            report.state = RunState::BuildingWorklist;

            let grid = store.rows().await?;
            let worklist = self.build_worklist(&grid);
            report.worklist = worklist.len();
            report.skipped = worklist.skipped;
            info!("{} row(s) to resolve, {} skipped", worklist.len(), worklist.skipped);

            let batches = partition(&worklist.items, self.settings.batch_size)?;
            let total = batches.len();
            report.batches = total;

            for batch in batches {
                report.state = RunState::ProcessingBatches {
                    index: batch.index,
                    total,
                };
                self.limiter.wait_before_next().await;
                info!("Processing batch {}/{} ({} key(s))", batch.index + 1, total, batch.len());

                let records = match self.executor.execute(&self.endpoint, &batch).await {
                    Ok(records) => records,
                    Err(e) => {
                        error!("Batch {}/{} failed: {}", batch.index + 1, total, e);
                        report.failed_batches += 1;
                        continue;
                    }
                };

                let reconciliation = reconcile(batch.items, records);
                if reconciliation.dangling > 0 {
                    debug!("{} record(s) matched no row", reconciliation.dangling);
                }
                if reconciliation.duplicates > 0 {
                    warn!("{} duplicate record(s) ignored", reconciliation.duplicates);
                }

                for result in &reconciliation.results {
                    let outcome = result.outcome();
                    self.writer.write(store, result.row, &outcome).await?;
                    report.record(&outcome);
                }
                store.flush().await?;
            }

            report.finish();
            info!("{}", report.summary());
            Ok(report)
        }
        .instrument(span)
        .await
    }
}
