//! fx-forecast CLI
//!
//! Load a EUR/USD daily series, analyse it and score a naive forecast.
//!
//! # Usage
//!
//! ```bash
//! # Analyse the cached series (fetching and caching it on first run)
//! fx-forecast analyze
//!
//! # Analyse a specific file, JSON output
//! fx-forecast analyze --input rates.csv --format json
//!
//! # Generate two years of history anchored to a quote
//! fx-forecast generate --start 2023-01-01 --end 2024-12-31 --anchor 1.0850
//!
//! # Print the current live quote
//! fx-forecast quote
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use fx_forecast::config::AppConfig;
use fx_forecast::data::csv_store::{write_returns, write_series, write_series_to};
use fx_forecast::data::loader::RateLoader;
use fx_forecast::data::quotes::{HttpQuoteSource, QuoteSource};
use fx_forecast::report::{AnalysisReport, ReportOptions};
use fx_forecast::simulation::generator::SeriesGenerator;
use log::{info, warn};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fx-forecast", version, about = "EUR/USD rate analysis and naive forecasting")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a series, analyse it and report forecast accuracy
    Analyze {
        /// CSV series to analyse (defaults to the configured data path)
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Do not contact any live quote source
        #[arg(long)]
        offline: bool,
        /// Write the series with daily returns to this CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Generate a synthetic weekday series
    Generate {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Terminal rate to anchor the history to
        #[arg(long)]
        anchor: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting rate of an unanchored walk
        #[arg(long)]
        initial_rate: Option<f64>,
        /// Write to file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the first available live EUR/USD quote
    Quote,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::from_file(path)?),
        None => Ok(AppConfig::default()),
    }
}

/// First date of a `days`-long history ending at `end`.
fn history_start(end: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|span| end.checked_sub_signed(span))
        .ok_or_else(|| anyhow!("history_days {} is out of range", days))
}

fn cmd_analyze(
    config: &AppConfig,
    input: Option<PathBuf>,
    format: Format,
    offline: bool,
    export: Option<PathBuf>,
) -> Result<()> {
    let generator = SeriesGenerator::new(config.generator.clone())?;
    let mut loader = RateLoader::new(generator, config.seed, config.initial_rate);
    if !(offline || config.offline) {
        let sources = HttpQuoteSource::all().context("building HTTP client")?;
        loader = loader.with_sources(
            sources
                .into_iter()
                .map(|s| Box::new(s) as Box<dyn QuoteSource>),
        );
    }

    let end = Local::now().date_naive();
    let start = history_start(end, config.history_days)?;
    let path = input.unwrap_or_else(|| config.data_path.clone());
    let loaded = loader
        .load_or_fetch(&path, start, end)
        .with_context(|| format!("loading rates from {}", path.display()))?;
    info!("series source: {}", loaded.origin);

    let options = ReportOptions {
        recent_window: config.recent_window,
        histogram_bins: config.histogram_bins,
    };
    let report = AnalysisReport::build(&loaded.series, &options)?;

    match format {
        Format::Text => {
            println!("Source:        {}", loaded.origin);
            print!("{}", report);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(export) = export {
        write_returns(&export, &report.series)?;
        info!("exported analysed series to {}", export.display());
    }
    Ok(())
}

fn cmd_generate(
    config: &AppConfig,
    start: NaiveDate,
    end: NaiveDate,
    anchor: Option<f64>,
    seed: Option<u64>,
    initial_rate: Option<f64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let generator = SeriesGenerator::new(config.generator.clone())?;
    let seed = seed.unwrap_or(config.seed);
    let series = match anchor {
        Some(rate) => generator.generate_anchored(rate, start, end, seed)?,
        None => generator.generate_unanchored(
            start,
            end,
            initial_rate.unwrap_or(config.initial_rate),
            seed,
        )?,
    };

    match output {
        Some(path) => {
            write_series(&path, &series)?;
            eprintln!("Generated {} weekdays → {}", series.len(), path.display());
        }
        None => write_series_to(std::io::stdout().lock(), &series)?,
    }
    Ok(())
}

fn cmd_quote() -> Result<()> {
    for source in HttpQuoteSource::all()? {
        match source.current_rate() {
            Ok(rate) => {
                println!("{}: {:.4}", source.name(), rate);
                return Ok(());
            }
            Err(e) => warn!("{} failed: {}", source.name(), e),
        }
    }
    Err(anyhow!("no quote source responded"))
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    match cli.command {
        Command::Analyze {
            input,
            format,
            offline,
            export,
        } => cmd_analyze(&config, input, format, offline, export),
        Command::Generate {
            start,
            end,
            anchor,
            seed,
            initial_rate,
            output,
        } => cmd_generate(&config, start, end, anchor, seed, initial_rate, output),
        Command::Quote => cmd_quote(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
