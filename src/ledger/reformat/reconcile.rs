//! Net value computation and balance verification.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::ledger::reformat::error::{Result, ToolError};
use crate::ledger::reformat::model::{
    CellValue, LedgerLine, ReconciledTable, StructuredTable, row_contains,
};
use crate::ledger::reformat::schema::Schema;

/// Outcome of reconciling one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// The net values balance; the table may be projected.
    Balanced(ReconciledTable),
    /// The table is excluded from output for the given reason.
    Skipped(SkippedFile),
}

/// An input left out of the output set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub source: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Debits and credits do not cancel out.
    Unbalanced { sum: f64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unbalanced { sum } => {
                write!(f, "credit and debit do not sum to zero (net {sum})")
            }
        }
    }
}

/// Attaches net values, drops the total line and checks the table balances.
///
/// A missing debit/credit column or total line is fatal for the run; an
/// unbalanced table is only skipped.
#[instrument(level = "debug", skip_all, fields(path = %table.source.display()))]
pub fn reconcile(table: StructuredTable, schema: &Schema) -> Result<Reconciliation> {
    let debit_idx = require_column(&table, &schema.debit)?;
    let credit_idx = require_column(&table, &schema.credit)?;

    let StructuredTable {
        source,
        columns,
        rows,
    } = table;

    let mut lines = Vec::with_capacity(rows.len());
    for cells in rows {
        let debit = amount(&cells[debit_idx], &schema.debit)?;
        let credit = amount(&cells[credit_idx], &schema.credit)?;
        lines.push(LedgerLine {
            net_value: round_cents(debit - credit),
            cells,
        });
    }

    let total_idx = lines
        .iter()
        .position(|line| row_contains(&line.cells, &schema.total_sentinel))
        .ok_or_else(|| ToolError::TotalNotFound {
            path: source.clone(),
            sentinel: schema.total_sentinel.clone(),
        })?;
    let total = lines.remove(total_idx);
    debug!(total_idx, total = total.net_value, "removed total line");

    let reconciled = ReconciledTable {
        source,
        columns,
        lines,
    };

    let sum = reconciled.net_total();
    if sum.abs() > schema.balance_tolerance {
        warn!(
            path = %reconciled.source.display(),
            sum,
            "credit and debit don't sum to zero, skipping file"
        );
        return Ok(Reconciliation::Skipped(SkippedFile {
            source: reconciled.source,
            reason: SkipReason::Unbalanced { sum },
        }));
    }

    Ok(Reconciliation::Balanced(reconciled))
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reads a debit or credit cell. Blank cells count as zero.
pub fn amount(cell: &CellValue, column: &str) -> Result<f64> {
    match cell {
        CellValue::Number(value) => Ok(*value),
        CellValue::Boolean(value) => Ok(if *value { 1.0 } else { 0.0 }),
        CellValue::Empty => Ok(0.0),
        CellValue::String(text) => {
            let cleaned: String = text.trim().chars().filter(|ch| *ch != ',').collect();
            if cleaned.is_empty() {
                return Ok(0.0);
            }
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ToolError::InvalidLiteral {
                    column: column.to_string(),
                    value: text.clone(),
                })
        }
    }
}

fn require_column(table: &StructuredTable, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| ToolError::MissingColumn {
            path: table.source.clone(),
            column: column.to_string(),
        })
}
