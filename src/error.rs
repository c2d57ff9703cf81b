// src/error.rs
//! Error categories the binary tells apart.
//!
//! Everything flows through `anyhow::Result` with context attached at each
//! boundary; these types sit at the root of the chain so `main` can
//! `downcast_ref` and decide between a usage message and a plain data failure.

use std::path::PathBuf;
use thiserror::Error;

/// Bad settings: flags, config file contents, or values that make the run
/// meaningless before any data is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("quarter must be between 1 and 4, got {0}")]
    InvalidQuarter(u32),

    #[error("year {0} is out of the supported date range")]
    InvalidYear(i32),

    #[error("records per day must be positive")]
    ZeroRecordsPerDay,

    #[error("target record count must be positive")]
    ZeroTarget,

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}

/// Problems with the input data or with what the data implies for sampling.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no eligible rows to sample from")]
    EmptyPopulation,

    #[error("sampling fraction {fraction} is outside (0, 1] (target {target}, population {population})")]
    FractionOutOfRange {
        fraction: f64,
        target: u64,
        population: u64,
    },

    #[error("column '{0}' not found in input header")]
    MissingColumn(String),

    #[error("input file has no header row")]
    MissingHeader,
}
