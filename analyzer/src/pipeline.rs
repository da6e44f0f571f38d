//! Batch driver: load, engineer, describe, chart and write every stock CSV

use std::path::{Path, PathBuf};

use shared::ArtifactStore;
use tracing::{info, warn};

use crate::data::{load_stock_data, PriceFrame};
use crate::error::Result;
use crate::features::feature_engineer;
use crate::plot;
use crate::stats::{compare_stocks, descriptive_stats, format_comparison};

/// Result of analyzing one CSV
#[derive(Debug, Clone)]
pub struct StockAnalysis {
    pub name: String,
    pub summary_path: PathBuf,
    pub plots: Vec<PathBuf>,
    pub frame: PriceFrame,
}

/// Outcome of a whole batch
#[derive(Debug)]
pub struct RunReport {
    pub plots_dir: PathBuf,
    pub stocks: Vec<StockAnalysis>,
    /// `comparison_stats.txt`, written when exactly two stocks ran
    pub comparison: Option<PathBuf>,
    /// `<a>_vs_<b>.png`, when both stocks had a Close column
    pub comparison_plot: Option<PathBuf>,
}

impl RunReport {
    pub fn stock_names(&self) -> Vec<&str> {
        self.stocks.iter().map(|s| s.name.as_str()).collect()
    }

    /// Closing lines printed by the `analyze` binary
    pub fn format(&self) -> String {
        let mut out = format!(
            "Analysis complete. Plots saved to {}\nSummaries written for: {}\n",
            self.plots_dir.display(),
            self.stock_names().join(", ")
        );
        if self.comparison.is_some() {
            out.push_str("Comparison written to comparison_stats.txt\n");
        }
        if let Some(plot) = &self.comparison_plot {
            out.push_str(&format!("Comparison chart: {}\n", plot.display()));
        }
        out
    }
}

/// Stock label derived from a CSV file name
pub fn stock_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.replace("_stock_data", "")
        .replace("_5yr_one", "")
        .replace("google", "Google")
}

/// Every `*.csv` directly inside `dir`, sorted by file name
pub fn find_stock_csvs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut csvs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            csvs.push(path);
        }
    }
    csvs.sort();
    Ok(csvs)
}

fn keep_plot(stock: &str, chart: &str, outcome: Result<Option<PathBuf>>, plots: &mut Vec<PathBuf>) {
    match outcome {
        Ok(Some(path)) => plots.push(path),
        Ok(None) => info!("{}: skipped {} chart, required columns missing", stock, chart),
        Err(err) => warn!("{}: failed to render {} chart: {}", stock, chart, err),
    }
}

/// Analyze one CSV: write its summary and render its charts.
///
/// Load errors propagate; chart failures are logged and skipped.
pub fn analyze_stock(csv_path: &Path, store: &ArtifactStore) -> Result<StockAnalysis> {
    let name = stock_name_from_path(csv_path);
    info!("Analyzing {} from {}", name, csv_path.display());

    let frame = feature_engineer(&load_stock_data(csv_path)?)?;
    let summary = descriptive_stats(&frame);
    let summary_path = store.write_summary(&name, &summary)?;

    let mut plots = Vec::new();
    keep_plot(&name, "price/MA", plot::plot_price_and_ma(&frame, &name, store), &mut plots);
    keep_plot(&name, "volume", plot::plot_volume(&frame, &name, store), &mut plots);
    match plot::plot_returns_distribution(&frame, &name, store) {
        Ok(paths) if paths.is_empty() => info!("{}: skipped returns charts, no Daily_Return", name),
        Ok(paths) => plots.extend(paths),
        Err(err) => warn!("{}: failed to render returns charts: {}", name, err),
    }
    keep_plot(&name, "monthly close", plot::plot_monthly_close(&frame, &name, store), &mut plots);
    keep_plot(&name, "correlation", plot::plot_correlation_heatmap(&frame, &name, store), &mut plots);
    keep_plot(&name, "seasonal decompose", plot::plot_seasonal_decompose(&frame, &name, store), &mut plots);

    info!("{}: {} rows, {} charts", name, frame.len(), plots.len());
    Ok(StockAnalysis {
        name,
        summary_path,
        plots,
        frame,
    })
}

/// Analyze the given CSVs; exactly two stocks also get a comparison chart
/// and `comparison_stats.txt`.
pub fn run(csvs: &[PathBuf], store: &ArtifactStore) -> Result<RunReport> {
    store.ensure_dirs()?;

    let mut stocks = Vec::with_capacity(csvs.len());
    for csv in csvs {
        stocks.push(analyze_stock(csv, store)?);
    }

    let mut comparison = None;
    let mut comparison_plot = None;
    if let [a, b] = stocks.as_slice() {
        comparison_plot = match plot::plot_comparison(&a.frame, &b.frame, &a.name, &b.name, store) {
            Ok(path) => path,
            Err(err) => {
                warn!("{} vs {}: failed to render comparison chart: {}", a.name, b.name, err);
                None
            }
        };

        let text = format_comparison(&compare_stocks(&a.frame, &b.frame, &a.name, &b.name));
        comparison = Some(store.write_comparison(&text)?);
    }

    Ok(RunReport {
        plots_dir: store.plots_dir().to_path_buf(),
        stocks,
        comparison,
        comparison_plot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_name_from_path() {
        assert_eq!(stock_name_from_path(Path::new("/d/google_stock_data.csv")), "Google");
        assert_eq!(stock_name_from_path(Path::new("Netflix_5yr_one.csv")), "Netflix");
        assert_eq!(stock_name_from_path(Path::new("amazon_clean.csv")), "amazon_clean");
    }

    #[test]
    fn test_find_stock_csvs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.CSV", "notes.txt", "comparison_stats.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        let found = find_stock_csvs(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }
}
