use tracing::{debug, info, warn};

use crate::ledger::reformat::model::{SchemaReport, StructuredTable};
use crate::ledger::reformat::schema::Schema;

/// Compares the table's labels with the expected columns.
///
/// Never fails: missing columns and unexpected extras are reported and the
/// table continues through the pipeline. The first unexpected label is
/// assumed to be the period date column. Blank labels are not considered.
pub fn validate(table: &StructuredTable, schema: &Schema) -> SchemaReport {
    let path = table.source.display();
    let mut report = SchemaReport::default();

    for expected in schema.required_columns() {
        if table.column_index(expected).is_none() {
            warn!(%path, column = expected, "table appears to be missing a column");
            report.missing.push(expected.to_string());
        }
    }

    for label in &table.columns {
        if label.trim().is_empty() || schema.is_required(label) {
            continue;
        }
        if report.inferred_date_column.is_none() {
            info!(%path, column = %label, "assuming this is the date column");
            report.inferred_date_column = Some(label.clone());
        } else {
            warn!(%path, column = %label, "ignoring extra column, attempting to continue");
            report.ignored.push(label.clone());
        }
    }

    if report.is_clean() {
        debug!(%path, "columns match the schema");
    }
    report
}
