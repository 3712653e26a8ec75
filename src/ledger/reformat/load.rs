//! Header discovery for loosely formatted exports.
//!
//! Exports carry an unknown number of title and metadata rows above the real
//! table. The header row is found by scanning for the schema's header
//! sentinel in any column; the row `label_row_offset` rows below that match
//! supplies the column labels, and every later row becomes data.

use std::path::Path;

use tracing::{debug, instrument};

use crate::ledger::reformat::error::{Result, ToolError};
use crate::ledger::reformat::io::excel_read;
use crate::ledger::reformat::model::{CellValue, RawTable, StructuredTable, row_contains};
use crate::ledger::reformat::schema::Schema;

/// Reads the workbook at `path` and structures it around its header row.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load(path: &Path, schema: &Schema) -> Result<StructuredTable> {
    let raw = excel_read::read_raw_table(path)?;
    structure(raw, schema)
}

/// Re-interprets a raw grid using the row located by the header sentinel.
///
/// Rows above the label row are discarded, the label row is consumed as the
/// column labels, and fully blank rows below it are dropped. Every data row is
/// padded or truncated to the label width.
pub fn structure(raw: RawTable, schema: &Schema) -> Result<StructuredTable> {
    let RawTable { source, rows } = raw;

    let header_not_found = || ToolError::HeaderNotFound {
        path: source.clone(),
        sentinel: schema.header_sentinel.clone(),
    };

    let sentinel_idx = find_row(&rows, &schema.header_sentinel).ok_or_else(header_not_found)?;
    let label_idx = sentinel_idx + schema.label_row_offset;
    let label_row = rows.get(label_idx).ok_or_else(header_not_found)?;

    let columns: Vec<String> = label_row.iter().map(CellValue::to_string).collect();
    let width = columns.len();
    debug!(sentinel_idx, label_idx, ?columns, "located header row");

    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .skip(label_idx + 1)
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .map(|mut row| {
            row.resize(width, CellValue::Empty);
            row
        })
        .collect();

    Ok(StructuredTable {
        source,
        columns,
        rows,
    })
}

/// Index of the first row holding a text cell equal to `sentinel`.
pub fn find_row(rows: &[Vec<CellValue>], sentinel: &str) -> Option<usize> {
    rows.iter().position(|row| row_contains(row, sentinel))
}
