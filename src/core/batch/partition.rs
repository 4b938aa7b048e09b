//! Fixed-size batch partitioning

use super::types::WorkItem;
use crate::utils::error::{Result, SyncError};
use std::iter::Enumerate;
use std::slice::Chunks;

/// One batch of a worklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Zero-based position in the batch sequence
    pub index: usize,
    pub items: &'a [WorkItem],
}

impl<'a> Batch<'a> {
    /// Keys of the batch, in worklist order
    pub fn keys(&self) -> Vec<&'a str> {
        self.items.iter().map(|item| item.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lazy sequence of batches over a worklist
#[derive(Debug, Clone)]
pub struct Batches<'a> {
    chunks: Enumerate<Chunks<'a, WorkItem>>,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks
            .next()
            .map(|(index, items)| Batch { index, items })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Batches<'_> {}

/// Split `items` into consecutive batches of at most `batch_size` items.
///
/// Every batch but the last holds exactly `batch_size` items, and chaining
/// the batches back together yields `items` unchanged.
pub fn partition(items: &[WorkItem], batch_size: usize) -> Result<Batches<'_>> {
    if batch_size == 0 {
        return Err(SyncError::InvalidConfiguration(
            "batch size must be at least 1".to_string(),
        ));
    }
    Ok(Batches {
        chunks: items.chunks(batch_size).enumerate(),
    })
}
