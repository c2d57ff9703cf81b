// src/write/mod.rs
use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::OutputFormat;
use crate::mock::MockedRows;

pub mod columnar;
pub mod delimited;
pub mod preview;

pub use columnar::{to_record_batch, write_parquet};
pub use delimited::write_csv;
pub use preview::write_preview;

/// Write `mocked` to `path` in the requested format.
#[tracing::instrument(level = "info", skip(path, mocked), fields(path = %path.display(), rows = mocked.len()))]
pub fn write_output(
    path: &Path,
    mocked: &MockedRows,
    format: OutputFormat,
    delimiter: u8,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let rows = write_csv(path, mocked, delimiter)?;
            info!(rows, "wrote csv");
        }
        OutputFormat::Parquet => {
            let bytes = write_parquet(path, mocked)?;
            info!(bytes, "wrote parquet");
        }
    }
    Ok(())
}
