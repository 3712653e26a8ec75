//! Batch orchestration: load, validate, reconcile and project every file of
//! an input folder.
//!
//! Each stage runs over the whole batch before the next one starts. A missing
//! sentinel anywhere therefore aborts the run before a single output file is
//! written, while an unbalanced file is only dropped from the batch.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::ledger::reformat::error::{Result, ToolError};
use crate::ledger::reformat::io::excel_write;
use crate::ledger::reformat::load::load;
use crate::ledger::reformat::model::{OutputRow, ReconciledTable, StructuredTable};
use crate::ledger::reformat::project::project;
use crate::ledger::reformat::reconcile::{Reconciliation, SkippedFile, reconcile};
use crate::ledger::reformat::schema::Schema;
use crate::ledger::reformat::validate::validate;

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Output files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Inputs excluded from the output set.
    pub skipped: Vec<SkippedFile>,
}

/// Reformats every file in `input_dir`, writing results into `output_dir`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input_dir.display(), output = %output_dir.display())
)]
pub fn run(input_dir: &Path, output_dir: &Path, schema: &Schema) -> Result<RunReport> {
    let paths = list_input_files(input_dir)?;
    info!(file_count = paths.len(), files = ?paths, "found input files");

    let tables = paths
        .iter()
        .map(|path| -> Result<StructuredTable> {
            let table = load(path, schema)?;
            validate(&table, schema);
            Ok(table)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut balanced: Vec<ReconciledTable> = Vec::with_capacity(tables.len());
    let mut report = RunReport::default();
    for table in tables {
        match reconcile(table, schema)? {
            Reconciliation::Balanced(table) => balanced.push(table),
            Reconciliation::Skipped(skipped) => report.skipped.push(skipped),
        }
    }

    let projected = balanced
        .iter()
        .map(|table| -> Result<(PathBuf, Vec<OutputRow>)> {
            Ok((output_path(output_dir, &table.source), project(table, schema)?))
        })
        .collect::<Result<Vec<_>>>()?;

    if !projected.is_empty() {
        fs::create_dir_all(output_dir)?;
    }
    for (output, rows) in projected {
        excel_write::write_output(&output, &rows)?;
        info!(output = %output.display(), row_count = rows.len(), "wrote formatted file");
        report.written.push(output);
    }

    info!(written = ?report.written, "successfully formatted");
    for skipped in &report.skipped {
        warn!(path = %skipped.source.display(), reason = %skipped.reason, "file was not formatted");
    }

    Ok(report)
}

/// Lists the regular files of `input_dir`, sorted by file name.
pub fn list_input_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(ToolError::MissingInput(input_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort_by(|lhs, rhs| lhs.file_name().cmp(&rhs.file_name()));
    Ok(paths)
}

/// Output location for `source`: same file name, inside `output_dir`.
pub fn output_path(output_dir: &Path, source: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(source),
    }
}
