use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ledger::reformat::error::{Result, ToolError};

/// Sentinel identifying the column-header row of a trial balance export.
pub const DEFAULT_HEADER_SENTINEL: &str = "Account Code";
/// Sentinel identifying the pre-computed total line.
pub const DEFAULT_TOTAL_SENTINEL: &str = "Total";
/// Largest absolute residue tolerated when net values are summed.
pub const DEFAULT_BALANCE_TOLERANCE: f64 = 0.001;

/// Describes the layout of the accounting exports being reformatted.
///
/// The schema is an immutable value: it is built once (from defaults or a JSON
/// file) and passed by reference into every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Text whose presence in a row marks the header row.
    pub header_sentinel: String,
    /// Text whose presence in a row marks the total line.
    pub total_sentinel: String,
    /// Label of the account code column.
    pub account_code: String,
    /// Label of the account name column.
    pub account_name: String,
    /// Label of the credit column.
    pub credit: String,
    /// Label of the debit column.
    pub debit: String,
    /// Label of the account type column.
    pub account_type: String,
    /// Number of rows between the sentinel row and the row supplying column
    /// labels. Zero means the sentinel row itself holds the labels.
    pub label_row_offset: usize,
    /// Maximum absolute sum of net values for a table to count as balanced.
    pub balance_tolerance: f64,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            header_sentinel: DEFAULT_HEADER_SENTINEL.to_string(),
            total_sentinel: DEFAULT_TOTAL_SENTINEL.to_string(),
            account_code: "Account Code".to_string(),
            account_name: "Account".to_string(),
            credit: "Credit - Year to date".to_string(),
            debit: "Debit - Year to date".to_string(),
            account_type: "Account Type".to_string(),
            label_row_offset: 0,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
        }
    }
}

impl Schema {
    /// Reads a schema from a JSON document. Omitted fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let schema: Schema = serde_json::from_str(&data)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Expected column labels in their canonical order.
    pub fn required_columns(&self) -> [&str; 5] {
        [
            self.account_code.as_str(),
            self.account_name.as_str(),
            self.credit.as_str(),
            self.debit.as_str(),
            self.account_type.as_str(),
        ]
    }

    /// Returns `true` when `label` is one of the expected columns.
    pub fn is_required(&self, label: &str) -> bool {
        self.required_columns().contains(&label)
    }

    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.header_sentinel.is_empty() {
            return Err(ToolError::InvalidSchema(
                "header_sentinel must not be empty".into(),
            ));
        }
        if self.total_sentinel.is_empty() {
            return Err(ToolError::InvalidSchema(
                "total_sentinel must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for column in self.required_columns() {
            if column.trim().is_empty() {
                return Err(ToolError::InvalidSchema(
                    "column names must not be empty".into(),
                ));
            }
            if !seen.insert(column) {
                return Err(ToolError::InvalidSchema(format!(
                    "column '{column}' is configured more than once"
                )));
            }
        }

        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(ToolError::InvalidSchema(format!(
                "balance_tolerance must be a non-negative number, got {}",
                self.balance_tolerance
            )));
        }

        Ok(())
    }
}
