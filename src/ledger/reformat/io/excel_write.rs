use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::ledger::reformat::error::Result;
use crate::ledger::reformat::model::{CellValue, OutputRow};

/// Writes the rows to a single-sheet workbook at `path`.
///
/// The import template has no header row, so the first record lands on the
/// first row. Blank template positions are left unwritten.
pub fn write_output(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.to_cells().iter().enumerate() {
            let (row_num, col_num) = (row_idx as u32, col_idx as u16);
            match cell {
                CellValue::Number(value) => {
                    worksheet.write_number(row_num, col_num, *value)?;
                }
                CellValue::String(value) => {
                    worksheet.write_string(row_num, col_num, value)?;
                }
                CellValue::Boolean(value) => {
                    worksheet.write_boolean(row_num, col_num, *value)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
