//! Batched sync data model

use crate::storage::{CellValue, RowRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker carried by successful status strings
pub const SUCCESS_MARKER: &str = "✅";
/// Marker carried by failed status strings
pub const FAILURE_MARKER: &str = "❌";

/// One row awaiting remote resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItem {
    pub key: String,
    pub row: RowRef,
}

impl WorkItem {
    pub fn new(key: impl Into<String>, row: RowRef) -> Self {
        Self {
            key: key.into(),
            row,
        }
    }
}

/// Remote answer for one key
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(CellValue),
    NotFound,
}

/// Resolution of one work item of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResult {
    pub key: String,
    pub row: RowRef,
    pub resolution: Resolution,
}

impl RemoteResult {
    /// Outcome to persist for this result
    pub fn outcome(&self) -> RowOutcome {
        match &self.resolution {
            Resolution::Found(value) => RowOutcome::Resolved(value.clone()),
            Resolution::NotFound => RowOutcome::NotFound,
        }
    }
}

/// Final state of a row, rendered to text only when written
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Value found remotely
    Resolved(CellValue),
    /// Valid response without a matching record
    NotFound,
    /// Every sub-operation succeeded
    Success,
    /// Exactly one of the two sub-operations succeeded
    PartialFailure { inventory: bool, price: bool },
    /// Nothing succeeded
    Failure(String),
    /// Row rejected before any remote call
    Invalid(String),
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Resolved(_) | RowOutcome::Success)
    }

    /// Outcome of a two-step inventory and price update
    pub fn from_sub_operations(inventory: bool, price: bool) -> Self {
        match (inventory, price) {
            (true, true) => RowOutcome::Success,
            (false, false) => RowOutcome::Failure("Inventory & Price Failed".to_string()),
            _ => RowOutcome::PartialFailure { inventory, price },
        }
    }
}

/// Whether a status cell records an earlier full success.
///
/// Partial outcomes carry both markers and do not count.
pub fn is_success_status(status: &CellValue) -> bool {
    let text = status.as_text();
    text.contains(SUCCESS_MARKER) && !text.contains(FAILURE_MARKER)
}

/// Per-run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    BuildingWorklist,
    ProcessingBatches { index: usize, total: usize },
    Done,
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub job: String,
    pub run_id: String,
    pub sheet: String,
    pub state: RunState,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Rows in the worklist
    pub worklist: usize,
    pub batches: usize,
    pub failed_batches: usize,
    pub resolved: usize,
    pub not_found: usize,
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
    pub invalid: usize,
    /// Rows left alone: already done, duplicate or ignored keys
    pub skipped: usize,
}

impl SyncReport {
    pub fn new(
        job: impl Into<String>,
        run_id: impl Into<String>,
        sheet: impl Into<String>,
    ) -> Self {
        Self {
            job: job.into(),
            run_id: run_id.into(),
            sheet: sheet.into(),
            state: RunState::Idle,
            started_at: Utc::now(),
            finished_at: None,
            worklist: 0,
            batches: 0,
            failed_batches: 0,
            resolved: 0,
            not_found: 0,
            succeeded: 0,
            partial: 0,
            failed: 0,
            invalid: 0,
            skipped: 0,
        }
    }

    /// Count a persisted outcome
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Resolved(_) => self.resolved += 1,
            RowOutcome::NotFound => self.not_found += 1,
            RowOutcome::Success => self.succeeded += 1,
            RowOutcome::PartialFailure { .. } => self.partial += 1,
            RowOutcome::Failure(_) => self.failed += 1,
            RowOutcome::Invalid(_) => self.invalid += 1,
        }
    }

    pub fn finish(&mut self) {
        self.state = RunState::Done;
        self.finished_at = Some(Utc::now());
    }

    /// One-line completion message
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.worklist == 0 && self.invalid == 0 {
            parts.push("nothing to do".to_string());
        }
        for (count, label) in [
            (self.resolved, "resolved"),
            (self.not_found, "not found"),
            (self.succeeded, "updated"),
            (self.partial, "partially updated"),
            (self.failed, "failed"),
            (self.invalid, "invalid"),
            (self.skipped, "skipped"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}", count, label));
            }
        }
        if self.failed_batches > 0 {
            parts.push(format!(
                "{} of {} batch(es) failed, rerun to retry",
                self.failed_batches, self.batches
            ));
        }

        let marker = if self.failed_batches > 0 || self.failed > 0 || self.partial > 0 {
            "⏳"
        } else {
            SUCCESS_MARKER
        };
        format!(
            "{} {} completed on '{}': {}",
            marker,
            self.job,
            self.sheet,
            parts.join(", ")
        )
    }
}
