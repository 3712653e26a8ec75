use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failure cases that abort a reformatting run.
///
/// Unbalanced files are not represented here: they are skipped and reported
/// through [`crate::reconcile::Reconciliation::Skipped`] instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the schema file or the run report cannot be (de)serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when a workbook contains no worksheet to read.
    #[error("workbook has no worksheets: {0}")]
    EmptyWorkbook(PathBuf),

    /// No row of the workbook carries the header sentinel.
    #[error(
        "cannot find header in {path}: no row contains '{sentinel}', \
         please change `header_sentinel` in the schema configuration"
    )]
    HeaderNotFound { path: PathBuf, sentinel: String },

    /// No data row of the table carries the total sentinel.
    #[error(
        "cannot find total in {path}: no row contains '{sentinel}', \
         please change `total_sentinel` in the schema configuration"
    )]
    TotalNotFound { path: PathBuf, sentinel: String },

    /// A column needed to compute or project values is absent.
    #[error("column '{column}' is missing from {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// Raised when a debit or credit cell cannot be read as a number.
    #[error("invalid literal value '{value}' in column {column}")]
    InvalidLiteral { column: String, value: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input folder not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the schema configuration is unusable.
    #[error("invalid schema configuration: {0}")]
    InvalidSchema(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
