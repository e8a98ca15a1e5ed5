//! Spreadsheet ingestion: turns CSV rows into [`InventoryRecord`]s.

mod normalizer;
mod parser;
mod record;

pub use record::{page_file_name, InventoryRecord};

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum InventoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for InventoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryImportError::Io(err) => write!(f, "failed to read inventory sheet: {}", err),
            InventoryImportError::Csv(err) => write!(f, "invalid inventory CSV data: {}", err),
        }
    }
}

impl std::error::Error for InventoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryImportError::Io(err) => Some(err),
            InventoryImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for InventoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for InventoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingItemId,
    DuplicateItemId,
}

impl SkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingItemId => "row has no Item ID",
            Self::DuplicateItemId => "Item ID already used by an earlier row",
        }
    }
}

/// A row that was read but not turned into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub item_id: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryImport {
    pub records: Vec<InventoryRecord>,
    pub skipped: Vec<SkippedRow>,
}

pub struct InventoryImporter;

impl InventoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InventoryImport, InventoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads every row; rows without an ID and repeats of an earlier ID (by
    /// output file name) are reported in `skipped` and the first row wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<InventoryImport, InventoryImportError> {
        let mut import = InventoryImport::default();
        let mut seen: HashSet<String> = HashSet::new();

        for row in parser::parse_rows(reader)? {
            let reason = match row.record.item_id.as_deref() {
                None => Some(SkipReason::MissingItemId),
                Some(_) if !seen.insert(row.record.page_file_name()) => {
                    Some(SkipReason::DuplicateItemId)
                }
                Some(_) => None,
            };

            match reason {
                Some(reason) => import.skipped.push(SkippedRow {
                    line: row.line,
                    item_id: row.record.item_id,
                    reason,
                }),
                None => import.records.push(row.record),
            }
        }

        Ok(import)
    }
}
