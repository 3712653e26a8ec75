use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use ledger_reformat::pipeline::{self, RunReport};
use ledger_reformat::schema::Schema;
use ledger_reformat::{Result, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_level)?;

    let schema = match &cli.schema {
        Some(path) => Schema::from_json_file(path)?,
        None => Schema::default(),
    };

    let report = pipeline::run(&cli.input_folder, &cli.output_folder, &schema)?;

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
    }
    Ok(())
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reformat trial balance exports into the five-column import layout."
)]
struct Cli {
    /// Folder containing the exports to reformat.
    #[arg(long, default_value = "./files_to_format")]
    input_folder: PathBuf,

    /// Folder receiving one formatted workbook per balanced input.
    #[arg(long, default_value = "./formatted_files")]
    output_folder: PathBuf,

    /// Optional JSON file overriding sentinels, column names or tolerance.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Optional path where the run summary is written as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}
