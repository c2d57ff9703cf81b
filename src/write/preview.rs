// src/write/preview.rs
use std::io::{self, Write};

use crate::mock::MockedRows;

/// Cells longer than this are cut to `MAX_CELL_WIDTH - 3` chars plus `...`.
pub const MAX_CELL_WIDTH: usize = 20;

fn truncate_cell(value: &str) -> String {
    if value.chars().count() > MAX_CELL_WIDTH {
        let mut cut: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        cut.push_str("...");
        cut
    } else {
        value.to_string()
    }
}

/// Render the first `limit` rows as a bordered, right-aligned text table.
pub fn write_preview<W: Write>(out: &mut W, mocked: &MockedRows, limit: usize) -> io::Result<()> {
    let headers: Vec<String> = mocked.headers().iter().map(|h| truncate_cell(h)).collect();
    let cells: Vec<Vec<String>> = mocked
        .rows
        .iter()
        .take(limit)
        .map(|r| r.to_record().iter().map(truncate_cell).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(3)).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let border: String = widths.iter().fold(String::from("+"), |mut acc, w| {
        acc.push_str(&"-".repeat(*w));
        acc.push('+');
        acc
    });

    let line = |out: &mut W, row: &[String]| -> io::Result<()> {
        write!(out, "|")?;
        for (cell, w) in row.iter().zip(&widths) {
            write!(out, "{:>width$}|", cell, width = *w)?;
        }
        writeln!(out)
    };

    writeln!(out, "{}", border)?;
    line(out, &headers[..])?;
    writeln!(out, "{}", border)?;
    for row in &cells {
        line(out, &row[..])?;
    }
    writeln!(out, "{}", border)?;
    if mocked.len() > limit {
        let noun = if limit == 1 { "row" } else { "rows" };
        writeln!(out, "only showing top {} {}", limit, noun)?;
    }
    writeln!(out)
}
