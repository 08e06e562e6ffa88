//! Command-line front end: CSV bars in, enriched CSV out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stokast_core::{Bar, EnrichedBar, Signal};
use stokast_strategy::CrossoverConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stokast",
    version,
    about = "Stochastic cross-over signal pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enrich a CSV bar series with indicator and signal columns.
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// CSV file with timestamp,open,high,low,close rows in ascending time order.
    #[arg(long)]
    input: PathBuf,
    /// Destination CSV for the enriched series.
    #[arg(long)]
    output: PathBuf,
    /// TOML file overriding the default strategy parameters.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One input row. The pipeline trusts the caller to supply clean, ascending
/// bars; nothing is sorted or deduplicated here.
#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp: DateTime<Utc>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
}

/// One output row: the original bar plus every derived column. Undefined
/// indicator values serialize as empty fields.
#[derive(Debug, Serialize)]
struct EnrichedRecord {
    timestamp: DateTime<Utc>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    ema: Option<Decimal>,
    stoch_k: Option<Decimal>,
    stoch_d: Option<Decimal>,
    macd: Option<Decimal>,
    macd_signal: Option<Decimal>,
    signal: Signal,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(&args),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CrossoverConfig::default(),
    };
    let bars = read_bars(&args.input)?;
    let enriched = stokast_strategy::run(&bars, &config)?;
    write_enriched(&args.output, &enriched)?;

    let buys = enriched.iter().filter(|b| b.signal == Signal::Buy).count();
    let sells = enriched.iter().filter(|b| b.signal == Signal::Sell).count();
    info!(
        bars = enriched.len(),
        buys,
        sells,
        output = %args.output.display(),
        "wrote enriched series"
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<CrossoverConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let value: toml::Value = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    Ok(CrossoverConfig::try_from(value)?)
}

fn read_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bars at {}", path.display()))?;
    let mut bars = Vec::new();
    for record in reader.deserialize() {
        let record: BarRecord = record.context("malformed bar row")?;
        bars.push(Bar {
            timestamp: record.timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        });
    }
    Ok(bars)
}

fn write_enriched(path: &Path, series: &[EnrichedBar]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for out in series {
        writer.serialize(EnrichedRecord {
            timestamp: out.bar.timestamp,
            open: out.bar.open,
            high: out.bar.high,
            low: out.bar.low,
            close: out.bar.close,
            ema: out.indicators.ema,
            stoch_k: out.indicators.stoch_k,
            stoch_d: out.indicators.stoch_d,
            macd: out.indicators.macd,
            macd_signal: out.indicators.macd_signal,
            signal: out.signal,
        })?;
    }
    writer.flush()?;
    Ok(())
}
