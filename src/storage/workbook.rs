//! JSON workbook on disk
//!
//! A workbook file holds named sheets as row-major grids:
//!
//! ```json
//! { "sheets": { "fk": [["SKU", "FSN", "Qty"], ["PT0078", null, null]] } }
//! ```

use super::{CellValue, RowRef, TabularStore, read_cell, set_cell};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Named sheets of a workbook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: BTreeMap<String, Vec<Vec<CellValue>>>,
}

impl Workbook {
    /// Load a workbook file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SyncError::Storage(format!("Failed to read workbook {:?}: {}", path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SyncError::Storage(format!("Failed to parse workbook {:?}: {}", path, e))
        })
    }

    /// Write the workbook through a temporary file and rename
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "workbook.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// One sheet of a workbook file, opened for reading and writing.
///
/// Writes stay in memory until [`TabularStore::flush`]. Two processes
/// flushing the same file concurrently overwrite each other's rows.
#[derive(Debug)]
pub struct WorkbookFile {
    path: PathBuf,
    sheet: String,
    workbook: Workbook,
    dirty: bool,
}

impl WorkbookFile {
    /// Open `sheet` in the workbook at `path`
    pub async fn open<P: AsRef<Path>>(path: P, sheet: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Opening sheet '{}' in {:?}", sheet, path);

        let workbook = Workbook::load(&path).await?;
        if !workbook.sheets.contains_key(sheet) {
            return Err(SyncError::SheetNotFound(sheet.to_string()));
        }

        Ok(Self {
            path,
            sheet: sheet.to_string(),
            workbook,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether writes are waiting for a flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn grid(&self) -> &[Vec<CellValue>] {
        self.workbook
            .sheets
            .get(&self.sheet)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl TabularStore for WorkbookFile {
    fn name(&self) -> &str {
        &self.sheet
    }

    async fn rows(&self) -> Result<Vec<Vec<CellValue>>> {
        Ok(self.grid().to_vec())
    }

    async fn cell(&self, row: RowRef, column: usize) -> Result<CellValue> {
        Ok(read_cell(self.grid(), row, column))
    }

    async fn write_cell(&mut self, row: RowRef, column: usize, value: CellValue) -> Result<()> {
        let grid = self
            .workbook
            .sheets
            .get_mut(&self.sheet)
            .ok_or_else(|| SyncError::SheetNotFound(self.sheet.clone()))?;
        set_cell(grid, row, column, value);
        self.dirty = true;
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.workbook.save(&self.path).await?;
        self.dirty = false;
        debug!("Flushed sheet '{}' to {:?}", self.sheet, self.path);
        Ok(())
    }
}
