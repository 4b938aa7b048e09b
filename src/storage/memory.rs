//! In-memory sheet

use super::{CellValue, RowRef, TabularStore, read_cell, set_cell};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Grid held in memory; `flush` is a no-op
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    name: String,
    grid: Vec<Vec<CellValue>>,
    writes: usize,
}

impl MemorySheet {
    /// Create a sheet from a full grid, header row first
    pub fn new(name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            grid,
            writes: 0,
        }
    }

    /// Create a sheet from string rows; empty strings become empty cells
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let grid = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        if s.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::from(*s)
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(name, grid)
    }

    pub fn grid(&self) -> &[Vec<CellValue>] {
        &self.grid
    }

    pub fn get(&self, row: usize, column: usize) -> CellValue {
        read_cell(&self.grid, RowRef(row), column)
    }

    /// Number of cell writes since creation
    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[async_trait]
impl TabularStore for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn rows(&self) -> Result<Vec<Vec<CellValue>>> {
        Ok(self.grid.clone())
    }

    async fn cell(&self, row: RowRef, column: usize) -> Result<CellValue> {
        Ok(read_cell(&self.grid, row, column))
    }

    async fn write_cell(&mut self, row: RowRef, column: usize, value: CellValue) -> Result<()> {
        set_cell(&mut self.grid, row, column, value);
        self.writes += 1;
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
