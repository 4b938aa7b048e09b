//! Storage layer for sheet-sync
//!
//! The tabular store a sync run reads its worklist from and writes its
//! outcomes back into. Rows are addressed by their zero-based index in the
//! grid; row 0 is the header and never part of a worklist.

/// Cell values
pub mod cell;
/// In-memory sheet
pub mod memory;
/// JSON workbook on disk
pub mod workbook;

pub use cell::CellValue;
pub use memory::MemorySheet;
pub use workbook::{Workbook, WorkbookFile};

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locator of one row in a tabular store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowRef(pub usize);

impl RowRef {
    /// Zero-based grid index
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this row is the header row
    pub fn is_header(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RowRef {
    // Spreadsheet row numbers are one-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0 + 1)
    }
}

/// Row/column data source read and written by a sync run
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Name of the sheet
    fn name(&self) -> &str;

    /// Snapshot of the whole grid, header included
    async fn rows(&self) -> Result<Vec<Vec<CellValue>>>;

    /// Single cell; cells outside the grid are empty
    async fn cell(&self, row: RowRef, column: usize) -> Result<CellValue>;

    /// Write one cell, growing the grid when needed
    async fn write_cell(&mut self, row: RowRef, column: usize, value: CellValue) -> Result<()>;

    /// Persist pending writes
    async fn flush(&mut self) -> Result<()>;
}

/// Data rows of a grid snapshot, header skipped
pub fn data_rows(grid: &[Vec<CellValue>]) -> impl Iterator<Item = (RowRef, &[CellValue])> {
    grid.iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| (RowRef(index), row.as_slice()))
}

/// Cell of a row slice, empty when the row is short
pub fn column(row: &[CellValue], column: usize) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    row.get(column).unwrap_or(&EMPTY)
}

pub(crate) fn read_cell(grid: &[Vec<CellValue>], row: RowRef, col: usize) -> CellValue {
    grid.get(row.index())
        .and_then(|r| r.get(col))
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn set_cell(grid: &mut Vec<Vec<CellValue>>, row: RowRef, col: usize, value: CellValue) {
    if grid.len() <= row.index() {
        grid.resize_with(row.index() + 1, Vec::new);
    }
    let cells = &mut grid[row.index()];
    if cells.len() <= col {
        cells.resize(col + 1, CellValue::Empty);
    }
    cells[col] = value;
}
