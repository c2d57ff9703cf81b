// src/pipeline.rs
use anyhow::{Context, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::calendar::{CalendarStamper, DailyCapacity, SOURCE_CALENDAR_COLUMNS};
use crate::config::MockConfig;
use crate::load::{load_table, Table};
use crate::mock::{check_overflow, mock_rows};
use crate::sample::{exclude_quarter, sampling_fraction, Sampler};
use crate::write::{write_output, write_preview};

/// What a run did, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub target: u64,
    pub population: u64,
    pub fraction: f64,
    pub sampled: u64,
    /// `None` in debug mode, where only a preview is printed.
    pub output: Option<PathBuf>,
}

/// Load, filter, sample, re-date and emit. The preview goes to `preview_out`
/// when `cfg.debug` is set; otherwise the output file is written.
#[tracing::instrument(level = "info", skip_all, fields(input = %cfg.input.display()))]
pub fn run<W: Write>(cfg: &MockConfig, preview_out: &mut W) -> Result<RunSummary> {
    cfg.validate()?;
    let quarter = cfg.target_quarter()?;
    let excluded = quarter.previous()?.label();
    let capacity = cfg.records_per_day()?;
    let delimiter = cfg.delimiter_byte()?;

    let target = cfg
        .number
        .unwrap_or_else(|| capacity.total_over(quarter.start_date(), quarter.num_days()));
    info!(debug = cfg.debug, target, quarter = %quarter.label(), excluded = %excluded, "starting run");

    let table = load_table(&cfg.input, delimiter)?;
    for column in SOURCE_CALENDAR_COLUMNS {
        table
            .column_index(column)
            .with_context(|| format!("checking columns of {}", cfg.input.display()))?;
    }
    let population = exclude_quarter(table, &excluded)
        .with_context(|| format!("filtering {}", cfg.input.display()))?;

    let fraction = sampling_fraction(target, population.len() as u64).with_context(|| {
        format!(
            "computing sampling fraction for {} rows outside {}",
            population.len(),
            excluded
        )
    })?;
    info!(population = population.len(), fraction, "sampling fraction");

    let population_len = population.len() as u64;
    let Table { headers, rows } = population;
    let sampled = Table {
        headers,
        rows: Sampler::new(fraction, cfg.seed).sample(rows),
    };

    let mut stamper = CalendarStamper::new(&quarter, capacity);
    let mocked = mock_rows(sampled, &mut stamper);
    check_overflow(&mocked, quarter.end_date());

    let output = if cfg.debug {
        write_preview(preview_out, &mocked, cfg.preview_rows).context("writing preview")?;
        None
    } else {
        write_output(&cfg.output, &mocked, cfg.format, delimiter)?;
        Some(cfg.output.clone())
    };

    Ok(RunSummary {
        target,
        population: population_len,
        fraction,
        sampled: mocked.len() as u64,
        output,
    })
}
