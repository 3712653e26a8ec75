use std::fs;
use std::path::{Path, PathBuf};

use calamine::{DataType, Reader, open_workbook_auto};
use ledger_reformat::ToolError;
use ledger_reformat::load::load;
use ledger_reformat::model::CellValue;
use ledger_reformat::pipeline;
use ledger_reformat::reconcile::SkipReason;
use ledger_reformat::schema::Schema;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn text(value: &str) -> CellValue {
    CellValue::String(value.to_string())
}

fn num(value: f64) -> CellValue {
    CellValue::Number(value)
}

fn write_fixture(path: &Path, rows: &[Vec<CellValue>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_num, col_num) = (row_idx as u32, col_idx as u16);
            match cell {
                CellValue::String(value) => {
                    worksheet
                        .write_string(row_num, col_num, value)
                        .expect("string written");
                }
                CellValue::Number(value) => {
                    worksheet
                        .write_number(row_num, col_num, *value)
                        .expect("number written");
                }
                CellValue::Boolean(value) => {
                    worksheet
                        .write_boolean(row_num, col_num, *value)
                        .expect("boolean written");
                }
                CellValue::Empty => {}
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

/// A trial balance export with title rows above the table. `bank_debit`
/// controls whether the file balances against 200.00 of sales.
fn trial_balance(bank_debit: f64, with_total: bool) -> Vec<Vec<CellValue>> {
    let mut rows = vec![
        vec![text("Trial Balance")],
        vec![text("Demo Company (AU)")],
        vec![text("As at 30 June 2024")],
        vec![],
        vec![
            text("Account Code"),
            text("Account"),
            text("Account Type"),
            text("Debit - Year to date"),
            text("Credit - Year to date"),
            text("30 Jun 2024"),
        ],
        vec![
            text("4000"),
            text("Sales"),
            text("Revenue"),
            CellValue::Empty,
            num(200.0),
        ],
        vec![
            text("6100"),
            text("Advertising"),
            text("Expense"),
            num(150.0),
        ],
        vec![text("090"), text("Bank"), text("Bank"), num(bank_debit)],
    ];
    if with_total {
        rows.push(vec![
            CellValue::Empty,
            text("Total"),
            CellValue::Empty,
            num(150.0 + bank_debit),
            num(200.0),
        ]);
    }
    rows
}

fn read_output(path: &Path) -> Vec<Vec<DataType>> {
    let mut workbook = open_workbook_auto(path).expect("output opened");
    let range = workbook
        .worksheet_range_at(0)
        .expect("worksheet present")
        .expect("worksheet read");
    range.rows().map(|row| row.to_vec()).collect()
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn load_uses_the_sentinel_row_as_labels() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("tb.xlsx");
    write_fixture(&path, &trial_balance(50.0, true));

    let table = load(&path, &Schema::default()).expect("loaded");

    assert_eq!(table.source, path);
    assert_eq!(table.columns[0], "Account Code");
    assert_eq!(table.columns[5], "30 Jun 2024");
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0][1], text("Sales"));
}

#[test]
fn run_skips_unbalanced_file_and_formats_the_rest() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    write_fixture(&input.path().join("a_first.xlsx"), &trial_balance(50.0, true));
    write_fixture(&input.path().join("b_second.xlsx"), &trial_balance(60.0, true));
    write_fixture(&input.path().join("c_third.xlsx"), &trial_balance(50.0, true));

    let report =
        pipeline::run(input.path(), output.path(), &Schema::default()).expect("run completed");

    assert_eq!(
        file_names(&report.written),
        vec!["a_first.xlsx".to_string(), "c_third.xlsx".to_string()]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].source, input.path().join("b_second.xlsx"));
    assert_eq!(report.skipped[0].reason, SkipReason::Unbalanced { sum: 10.0 });

    assert!(output.path().join("a_first.xlsx").exists());
    assert!(!output.path().join("b_second.xlsx").exists());
    assert!(output.path().join("c_third.xlsx").exists());
}

#[test]
fn output_rows_follow_the_import_template() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    write_fixture(&input.path().join("tb.xlsx"), &trial_balance(50.0, true));

    pipeline::run(input.path(), output.path(), &Schema::default()).expect("run completed");
    let rows = read_output(&output.path().join("tb.xlsx"));

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec![
            DataType::Float(-200.0),
            DataType::Empty,
            DataType::String("Sales".to_string()),
            DataType::Empty,
            DataType::String("4000".to_string()),
        ]
    );
    assert_eq!(rows[1][0], DataType::Float(150.0));
    assert_eq!(rows[1][4], DataType::String("6100".to_string()));
    assert_eq!(rows[2][0], DataType::Float(50.0));
    assert_eq!(rows[2][2], DataType::String("Bank".to_string()));
}

#[test]
fn missing_total_aborts_before_any_output() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    let output_dir = output.path().join("formatted");
    write_fixture(&input.path().join("a_first.xlsx"), &trial_balance(50.0, true));
    write_fixture(&input.path().join("b_second.xlsx"), &trial_balance(50.0, false));

    let error = pipeline::run(input.path(), &output_dir, &Schema::default())
        .expect_err("run aborted");

    match error {
        ToolError::TotalNotFound { path, sentinel } => {
            assert_eq!(path, input.path().join("b_second.xlsx"));
            assert_eq!(sentinel, "Total");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output_dir.exists());
}

#[test]
fn missing_header_aborts_the_run() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    write_fixture(&input.path().join("tb.xlsx"), &trial_balance(50.0, true));

    let schema = Schema {
        header_sentinel: "Code".to_string(),
        ..Schema::default()
    };
    let error = pipeline::run(input.path(), output.path(), &schema).expect_err("run aborted");

    assert!(matches!(error, ToolError::HeaderNotFound { .. }));
    assert!(error.to_string().contains("header_sentinel"));
    assert_eq!(fs::read_dir(output.path()).expect("listed").count(), 0);
}

#[test]
fn unreadable_file_fails_the_run() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    write_fixture(&input.path().join("tb.xlsx"), &trial_balance(50.0, true));
    fs::write(input.path().join("notes.xlsx"), "not a workbook").expect("file written");

    let result = pipeline::run(input.path(), output.path(), &Schema::default());
    assert!(matches!(result, Err(ToolError::ExcelRead(_))));
}

#[test]
fn missing_input_folder_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let missing = temp_dir.path().join("files_to_format");

    let result = pipeline::run(&missing, temp_dir.path(), &Schema::default());
    assert!(matches!(result, Err(ToolError::MissingInput(path)) if path == missing));
}

#[test]
fn input_listing_ignores_directories_and_sorts_by_name() {
    let input = tempdir().expect("input directory");
    fs::create_dir(input.path().join("archive")).expect("directory created");
    fs::write(input.path().join("b.xlsx"), "").expect("file written");
    fs::write(input.path().join("a.xlsx"), "").expect("file written");

    let paths = pipeline::list_input_files(input.path()).expect("listed");
    assert_eq!(
        file_names(&paths),
        vec!["a.xlsx".to_string(), "b.xlsx".to_string()]
    );
}

#[test]
fn schema_file_overrides_selected_fields() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{ "total_sentinel": "Grand Total", "balance_tolerance": 0.5 }"#,
    )
    .expect("schema written");

    let schema = Schema::from_json_file(&path).expect("schema parsed");

    assert_eq!(schema.total_sentinel, "Grand Total");
    assert_eq!(schema.balance_tolerance, 0.5);
    assert_eq!(schema.header_sentinel, "Account Code");
    assert_eq!(schema.debit, "Debit - Year to date");
}

#[test]
fn run_report_serialises_skips() {
    let input = tempdir().expect("input directory");
    let output = tempdir().expect("output directory");
    write_fixture(&input.path().join("tb.xlsx"), &trial_balance(60.0, true));

    let report =
        pipeline::run(input.path(), output.path(), &Schema::default()).expect("run completed");
    let json = serde_json::to_value(&report).expect("report serialised");

    assert_eq!(json["written"], serde_json::json!([]));
    assert_eq!(json["skipped"][0]["reason"]["kind"], "unbalanced");
    assert_eq!(json["skipped"][0]["reason"]["sum"], 10.0);
}
