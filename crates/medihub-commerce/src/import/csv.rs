//! Minimal comma-separated text parsing.
//!
//! Cells are split on every comma. Quoting and escaping are not supported,
//! so a quoted cell containing a comma is split in two.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A parsed CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    /// Cells of the first non-blank line.
    pub headers: Vec<String>,
    /// Cells of every following non-blank line.
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse CSV text into headers and rows.
///
/// Lines are trimmed and blank lines dropped; every cell is trimmed. Fails
/// if the text has no non-blank line.
pub fn parse_csv(text: &str) -> Result<CsvTable, CommerceError> {
    let mut lines = text.split('\n').map(str::trim).filter(|line| !line.is_empty());

    let headers = lines
        .next()
        .map(split_line)
        .ok_or_else(|| CommerceError::Parse("no header row found".to_string()))?;
    let rows = lines.map(split_line).collect();

    Ok(CsvTable { headers, rows })
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}
