//! Persisting row outcomes

use super::types::{FAILURE_MARKER, RowOutcome, SUCCESS_MARKER};
use crate::config::{BatchJobSettings, NotFoundPolicy, SheetLayout};
use crate::storage::{CellValue, RowRef, TabularStore};
use crate::utils::error::Result;
use tracing::debug;

/// Display string of an outcome
pub fn render_status(outcome: &RowOutcome) -> String {
    match outcome {
        RowOutcome::Resolved(_) => format!("{} Resolved", SUCCESS_MARKER),
        RowOutcome::NotFound => format!("{} Not found", FAILURE_MARKER),
        RowOutcome::Success => format!("{} Inventory & Price Updated", SUCCESS_MARKER),
        RowOutcome::PartialFailure { inventory, price } => format!(
            "{} {}",
            sub_status("Inventory", *inventory),
            sub_status("Price", *price)
        ),
        RowOutcome::Failure(reason) | RowOutcome::Invalid(reason) => {
            format!("{} {}", FAILURE_MARKER, reason)
        }
    }
}

fn sub_status(name: &str, ok: bool) -> String {
    if ok {
        format!("{} {} Updated", SUCCESS_MARKER, name)
    } else {
        format!("{} {} Failed", FAILURE_MARKER, name)
    }
}

/// Write a rendered status into one cell
pub async fn write_status<S: TabularStore + ?Sized>(
    store: &mut S,
    row: RowRef,
    column: usize,
    outcome: &RowOutcome,
) -> Result<()> {
    store
        .write_cell(row, column, CellValue::from(render_status(outcome)))
        .await
}

/// Writes lookup outcomes at the configured column offsets
#[derive(Debug, Clone)]
pub struct RowStatusWriter {
    layout: SheetLayout,
    sentinel: String,
    policy: NotFoundPolicy,
}

impl RowStatusWriter {
    pub fn new(layout: SheetLayout, sentinel: impl Into<String>, policy: NotFoundPolicy) -> Self {
        Self {
            layout,
            sentinel: sentinel.into(),
            policy,
        }
    }

    pub fn from_settings(settings: &BatchJobSettings) -> Self {
        Self::new(
            settings.layout.clone(),
            settings.not_found_sentinel.clone(),
            settings.not_found_policy,
        )
    }

    /// Write the value and, when the layout has one, the status of a row.
    ///
    /// Returns whether the value cell was written. Under
    /// [`NotFoundPolicy::FillEmpty`] a not-found result leaves a filled cell
    /// alone.
    pub async fn write<S: TabularStore + ?Sized>(
        &self,
        store: &mut S,
        row: RowRef,
        outcome: &RowOutcome,
    ) -> Result<bool> {
        let value = match outcome {
            RowOutcome::Resolved(value) => Some(value.clone()),
            RowOutcome::NotFound => {
                let current = store.cell(row, self.layout.value_column).await?;
                if self.policy == NotFoundPolicy::FillEmpty && !current.is_blank() {
                    debug!("Keeping existing value in {} ({})", row, current);
                    None
                } else {
                    Some(CellValue::from(self.sentinel.as_str()))
                }
            }
            _ => None,
        };

        let written = value.is_some();
        if let Some(value) = value {
            store.write_cell(row, self.layout.value_column, value).await?;
        }
        if let Some(column) = self.layout.status_column {
            write_status(store, row, column, outcome).await?;
        }
        Ok(written)
    }
}
