//! Iris Charts - CSV to scatter plot and boxplot
//!
//! Loads a CSV of petal measurements, computes per-species quartiles and
//! writes a scatter plot and a boxplot as SVG (or PNG) files.

mod charts;
mod config;
mod data;
mod pipeline;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use config::ChartConfig;
use data::{DataLoader, RowPolicy};
use pipeline::OutputOptions;
use std::path::PathBuf;
use tracing::{debug, info};

/// Render a scatter plot and a per-category boxplot from a CSV file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "iris-charts")]
struct Cli {
    /// Input CSV file with a header row
    #[arg(value_name = "INPUT", default_value = "iris.csv")]
    input: PathBuf,

    /// Directory for the generated charts
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Image format for both charts
    #[arg(short, long, value_enum, default_value = "svg")]
    format: FormatArg,

    /// Also write index.html with both charts inline (svg only)
    #[arg(long)]
    page: bool,

    /// JSON chart configuration; missing keys use defaults
    #[arg(short, long, value_name = "CONFIG_JSON")]
    config: Option<PathBuf>,

    /// Reject rows with missing or non-numeric values instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Write per-category quartile summaries as JSON
    #[arg(long, value_name = "JSON_PATH")]
    summary: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum FormatArg {
    Svg,
    Png,
}

impl From<FormatArg> for charts::ImageFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Svg => charts::ImageFormat::Svg,
            FormatArg::Png => charts::ImageFormat::Png,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    debug!(?args, "Parsed arguments");

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChartConfig::default(),
    };

    let policy = if args.strict {
        RowPolicy::Fail
    } else {
        RowPolicy::Skip
    };
    let dataset = DataLoader::new(config.columns.clone(), policy)
        .load_csv(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let (scatter, boxplot) = pipeline::run(&dataset, &config).context("Failed to build charts")?;

    for summary in boxplot.summaries() {
        let (low, high) = summary.whisker_with(config.whisker_factor);
        info!(
            "{}: n={} q1={:.3} median={:.3} q3={:.3} whisker=[{:.3}, {:.3}]",
            summary.label, summary.count, summary.q1, summary.median, summary.q3, low, high
        );
    }

    if let Some(path) = &args.summary {
        let summaries: Vec<_> = boxplot.summaries().cloned().collect();
        let json = stats::summaries_to_json(&summaries, config.whisker_factor)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        info!("Wrote quartile summary to {}", path.display());
    }

    let options = OutputOptions {
        dir: args.output_dir.clone(),
        format: args.format.clone().into(),
        page: args.page,
    };
    let outputs = pipeline::write_outputs(&scatter, &boxplot, &options)
        .context("Failed to write charts")?;
    if let Some(page) = &outputs.page {
        info!("Wrote {}", page.display());
    }

    Ok(())
}
