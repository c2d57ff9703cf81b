// src/config.rs
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::calendar::{Quarter, RecordsPerDay};
use crate::error::ConfigError;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "data_mocker.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Parquet,
}

/// Run settings. Every field has a default so a partial YAML file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Target record count. `None` means one full quarter at `records_per_day`.
    pub number: Option<u64>,
    /// Print a preview instead of writing the output file.
    pub debug: bool,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Calendar year of the quarter being synthesized.
    pub year: i32,
    pub quarter: u32,
    pub records_per_day: u32,
    /// When set, Saturdays and Sundays use this capacity instead.
    pub weekend_records_per_day: Option<u32>,
    pub seed: Option<u64>,
    pub preview_rows: usize,
    pub delimiter: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            number: None,
            debug: false,
            input: PathBuf::from("data/sales.csv"),
            output: PathBuf::from("new_data.csv"),
            format: OutputFormat::Csv,
            year: 2017,
            quarter: 4,
            records_per_day: 59,
            weekend_records_per_day: None,
            seed: None,
            preview_rows: 20,
            delimiter: ",".into(),
        }
    }
}

impl MockConfig {
    /// Load `path` if given, else `data_mocker.yaml` when it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Ok(Self::from_file(p)?),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Ok(Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?)
            }
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_quarter()?;
        self.records_per_day()?;
        self.delimiter_byte()?;
        if self.number == Some(0) {
            return Err(ConfigError::ZeroTarget);
        }
        Ok(())
    }

    pub fn target_quarter(&self) -> Result<Quarter, ConfigError> {
        Quarter::new(self.year, self.quarter)
    }

    pub fn records_per_day(&self) -> Result<RecordsPerDay, ConfigError> {
        let weekday =
            NonZeroU32::new(self.records_per_day).ok_or(ConfigError::ZeroRecordsPerDay)?;
        match self.weekend_records_per_day {
            None => Ok(RecordsPerDay::Fixed(weekday)),
            Some(n) => Ok(RecordsPerDay::WeekdaySplit {
                weekday,
                weekend: NonZeroU32::new(n).ok_or(ConfigError::ZeroRecordsPerDay)?,
            }),
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ConfigError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}
