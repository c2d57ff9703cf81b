use anyhow::Result;
use clap::{CommandFactory, Parser};
use data_mocker::{run, ConfigError, MockConfig, OutputFormat, RunSummary};
use std::{io, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resample historical sales rows into a synthetic future quarter"
)]
struct Args {
    /// Print a preview of the generated rows instead of writing a file
    #[arg(short = 't', long = "test")]
    test: bool,
    /// Target record count (defaults to one full quarter of records)
    #[arg(short = 'n', long = "number")]
    number: Option<u64>,
    /// YAML config file (default: ./data_mocker.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    quarter: Option<u32>,
}

impl Args {
    /// Flags win over the config file.
    fn apply(&self, mut cfg: MockConfig) -> MockConfig {
        if self.test {
            cfg.debug = true;
        }
        if let Some(n) = self.number {
            cfg.number = Some(n);
        }
        if let Some(p) = &self.input {
            cfg.input = p.clone();
        }
        if let Some(p) = &self.output {
            cfg.output = p.clone();
        }
        if let Some(f) = self.format {
            cfg.format = f;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(y) = self.year {
            cfg.year = y;
        }
        if let Some(q) = self.quarter {
            cfg.quarter = q;
        }
        cfg
    }
}

fn execute(args: &Args) -> Result<RunSummary> {
    let cfg = args.apply(MockConfig::load(args.config.as_deref())?);
    info!("debug is {}", cfg.debug);
    match cfg.number {
        Some(n) => info!("number is {}", n),
        None => info!("number is one full quarter"),
    }
    let stdout = io::stdout();
    run(&cfg, &mut stdout.lock())
}

fn main() -> ExitCode {
    // logs go to stderr so a preview on stdout stays clean
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match execute(&args) {
        Ok(summary) => {
            info!(
                sampled = summary.sampled,
                target = summary.target,
                output = ?summary.output,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) if err.downcast_ref::<ConfigError>().is_some() => {
            error!("configuration error: {:#}", err);
            eprintln!("\n{}", Args::command().render_help());
            ExitCode::from(2)
        }
        Err(err) => {
            error!("run failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
