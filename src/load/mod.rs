// src/load/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

use crate::error::DataError;

pub mod infer;

pub use infer::{infer_column_types, ColumnType};

/// An in-memory delimited file: normalized header plus every data row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }
}

/// `Week.Day` -> `Week_Day`. Dots in column names trip up column lookups
/// downstream, so every header goes through this on load.
pub fn normalize_header(name: &str) -> String {
    name.replace('.', "_")
}

/// Open `path` and read it with [`read_table`].
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Table> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open input file: {:?}", path.as_ref()))?;
    let table = read_table(file, delimiter)
        .with_context(|| format!("Failed to read {:?}", path.as_ref()))?;
    info!(
        rows = table.len(),
        columns = table.headers.len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse a header row and all records. Rows with a different field count than
/// the header are an error.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let raw_headers = rdr.headers().context("reading header row")?.clone();
    if raw_headers.is_empty() {
        return Err(DataError::MissingHeader.into());
    }
    let headers: Vec<String> = raw_headers.iter().map(normalize_header).collect();
    for (old, new) in raw_headers.iter().zip(&headers) {
        if old != new {
            debug!(from = old, to = %new, "renamed column");
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record);
    }

    Ok(Table { headers, rows })
}
