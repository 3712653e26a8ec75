use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};
use tracing::debug;

use crate::ledger::reformat::error::{Result, ToolError};
use crate::ledger::reformat::model::{CellValue, RawTable};

/// Reads the first worksheet of the workbook at `path` as an untyped grid.
///
/// The workbook format is detected from the file extension, so xlsx, xlsm,
/// xlsb, xls and ods exports are all accepted. Any file that cannot be opened
/// as a workbook is an error.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::EmptyWorkbook(path.to_path_buf()))??;

    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    debug!(path = %path.display(), row_count = rows.len(), "read worksheet");

    Ok(RawTable {
        source: path.to_path_buf(),
        rows,
    })
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::String(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}
