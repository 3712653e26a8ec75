use tracing_subscriber::EnvFilter;

use crate::ledger::reformat::error::{Result, ToolError};

/// Installs the global subscriber, printing diagnostics to stdout.
///
/// `RUST_LOG` takes precedence over `default_level` when it is set.
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|error| ToolError::Logging(error.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}
