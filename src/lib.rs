// src/lib.rs
pub mod calendar;
pub mod config;
pub mod error;
pub mod load;
pub mod mock;
pub mod pipeline;
pub mod sample;
pub mod write;

pub use config::{MockConfig, OutputFormat};
pub use error::{ConfigError, DataError};
pub use pipeline::{run, RunSummary};
