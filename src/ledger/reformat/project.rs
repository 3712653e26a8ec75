use crate::ledger::reformat::error::{Result, ToolError};
use crate::ledger::reformat::model::{OutputRow, ReconciledTable};
use crate::ledger::reformat::schema::Schema;

/// Maps every line of a balanced table onto the import template, keeping the
/// line order.
pub fn project(table: &ReconciledTable, schema: &Schema) -> Result<Vec<OutputRow>> {
    let name_idx = require_column(table, &schema.account_name)?;
    let code_idx = require_column(table, &schema.account_code)?;

    Ok(table
        .lines
        .iter()
        .map(|line| OutputRow {
            value: line.net_value,
            name: line.cells[name_idx].to_string(),
            code: line.cells[code_idx].to_string(),
        })
        .collect())
}

fn require_column(table: &ReconciledTable, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| ToolError::MissingColumn {
            path: table.source.clone(),
            column: column.to_string(),
        })
}
