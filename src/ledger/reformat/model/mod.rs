use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell with its scalar type preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Text cell.
    String(String),
    /// Numeric cell. Integers read from the workbook are widened to `f64`.
    Number(f64),
    /// Boolean cell.
    Boolean(bool),
    /// Blank cell, or a cell type without a scalar reading (errors).
    Empty,
}

impl CellValue {
    /// Returns `true` when the cell is a text cell equal to `text`.
    pub fn matches_text(&self, text: &str) -> bool {
        matches!(self, CellValue::String(value) if value == text)
    }

    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Boolean(value) => write!(f, "{value}"),
            CellValue::Empty => Ok(()),
        }
    }
}

/// Returns `true` when any cell of the row is a text cell equal to `sentinel`.
pub fn row_contains(row: &[CellValue], sentinel: &str) -> bool {
    row.iter().any(|cell| cell.matches_text(sentinel))
}

/// The first worksheet of an input file, with no column semantics applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Path of the file the grid was read from. Identifies the table for the
    /// whole run.
    pub source: PathBuf,
    pub rows: Vec<Vec<CellValue>>,
}

/// A table whose columns carry the labels found in the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredTable {
    pub source: PathBuf,
    /// Labels in column order. Blank header cells yield empty labels.
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` cells wide.
    pub rows: Vec<Vec<CellValue>>,
}

impl StructuredTable {
    /// Index of the first column labelled `label`.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }
}

/// One data row of a reconciled table.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
    pub cells: Vec<CellValue>,
    /// Debit minus credit, rounded to two decimal places.
    pub net_value: f64,
}

/// A structured table with net values attached and its total line removed.
///
/// Only tables whose net values balance are ever built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledTable {
    pub source: PathBuf,
    pub columns: Vec<String>,
    pub lines: Vec<LedgerLine>,
}

impl ReconciledTable {
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }

    /// Sum of the net values of every line.
    pub fn net_total(&self) -> f64 {
        self.lines.iter().map(|line| line.net_value).sum()
    }
}

/// Number of positional columns in the import template.
pub const OUTPUT_WIDTH: usize = 5;

/// One record of the import template:
/// `(value, <blank>, name, <blank>, code)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub value: f64,
    pub name: String,
    pub code: String,
}

impl OutputRow {
    /// Lays the record out in template order. The blank positions stay empty.
    pub fn to_cells(&self) -> [CellValue; OUTPUT_WIDTH] {
        [
            CellValue::Number(self.value),
            CellValue::Empty,
            text_or_empty(&self.name),
            CellValue::Empty,
            text_or_empty(&self.code),
        ]
    }
}

fn text_or_empty(value: &str) -> CellValue {
    if value.is_empty() {
        CellValue::Empty
    } else {
        CellValue::String(value.to_string())
    }
}

/// Schema drift found in one table. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaReport {
    /// Expected columns the table lacks, in schema order.
    pub missing: Vec<String>,
    /// First unexpected column, assumed to hold the period date.
    pub inferred_date_column: Option<String>,
    /// Further unexpected columns, tolerated and otherwise ignored.
    pub ignored: Vec<String>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.ignored.is_empty()
    }
}
