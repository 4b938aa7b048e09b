//! Mapping response records back to work items

use super::executor::KeyedRecord;
use super::types::{RemoteResult, Resolution, WorkItem};
use crate::storage::CellValue;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use tracing::debug;

/// Results of one batch
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// One result per work item, in batch order
    pub results: Vec<RemoteResult>,
    /// Records whose key matched no work item
    pub dangling: usize,
    /// Records ignored because an earlier record had the same key
    pub duplicates: usize,
}

/// Match `records` to `items` by exact key.
///
/// The first record for a key wins. Items without a record, or whose record
/// carries no value, resolve to [`Resolution::NotFound`].
pub fn reconcile<R: KeyedRecord>(items: &[WorkItem], records: Vec<R>) -> Reconciliation {
    let wanted: HashSet<&str> = items.iter().map(|item| item.key.as_str()).collect();
    let mut values: HashMap<String, Option<CellValue>> = HashMap::with_capacity(records.len());
    let mut dangling = 0;
    let mut duplicates = 0;

    for record in &records {
        if !wanted.contains(record.key()) {
            debug!("Ignoring record for unrequested key '{}'", record.key());
            dangling += 1;
            continue;
        }
        match values.entry(record.key().to_string()) {
            Entry::Occupied(_) => duplicates += 1,
            Entry::Vacant(slot) => {
                slot.insert(record.value());
            }
        }
    }

    let results = items
        .iter()
        .map(|item| {
            let resolution = match values.get(&item.key) {
                Some(Some(value)) => Resolution::Found(value.clone()),
                _ => Resolution::NotFound,
            };
            RemoteResult {
                key: item.key.clone(),
                row: item.row,
                resolution,
            }
        })
        .collect();

    Reconciliation {
        results,
        dangling,
        duplicates,
    }
}
