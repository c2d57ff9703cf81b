// src/write/delimited.rs
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, path::Path};

use crate::mock::MockedRows;

/// Write header + rows to `path`, creating parent directories as needed.
/// Returns the number of data rows written.
pub fn write_csv(path: &Path, mocked: &MockedRows, delimiter: u8) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating file {}", path.display()))?;

    wtr.write_record(mocked.headers())
        .context("writing header row")?;
    for row in &mocked.rows {
        wtr.write_record(&row.to_record())
            .context("writing data row")?;
    }
    wtr.flush().context("flushing csv writer")?;

    Ok(mocked.len() as u64)
}
