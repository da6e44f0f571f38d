use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use analyzer::pipeline::{find_stock_csvs, run};
use shared::{ArtifactStore, Config};

/// Analyze stock CSVs into summaries, charts and a comparison report
#[derive(Parser, Debug)]
#[command(name = "analyze", version)]
struct Args {
    /// Directory holding the stock CSVs; summaries are written here too
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for the PNG charts
    #[arg(long)]
    plots_dir: Option<PathBuf>,

    /// Analyze only these CSV files instead of every CSV in the data dir
    #[arg(long = "stock")]
    stocks: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let (data_dir, default_plots) = match args.data_dir {
        Some(dir) => (dir.clone(), dir.join("plots")),
        None => (config.data_dir, config.plots_dir),
    };
    let plots_dir = args.plots_dir.unwrap_or(default_plots);
    let store = ArtifactStore::new(&data_dir, plots_dir);

    let csvs = if args.stocks.is_empty() {
        find_stock_csvs(&data_dir).with_context(|| format!("scanning {}", data_dir.display()))?
    } else {
        args.stocks
    };
    if csvs.is_empty() {
        bail!("No CSV files found in {}", data_dir.display());
    }
    info!("Found {} CSV file(s)", csvs.len());

    let report = run(&csvs, &store)?;
    print!("{}", report.format());
    Ok(())
}
