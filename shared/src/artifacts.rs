//! Flat-file store for per-stock summaries, plots and the comparison report

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::StockOption;

pub const SUMMARY_SUFFIX: &str = "_analysis_summary";
pub const COMPARISON_FILE: &str = "comparison_stats.txt";
pub const COMPARISON_KEY: &str = "all";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    data_dir: PathBuf,
    plots_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(data_dir: impl Into<PathBuf>, plots_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            plots_dir: plots_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn plots_dir(&self) -> &Path {
        &self.plots_dir
    }

    /// Create the plots directory if it does not exist yet
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.plots_dir)
            .with_context(|| format!("creating {}", self.plots_dir.display()))
    }

    pub fn summary_path(&self, stock: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}.txt", stock, SUMMARY_SUFFIX))
    }

    pub fn write_summary(&self, stock: &str, summary: &str) -> Result<PathBuf> {
        let path = self.summary_path(stock);
        std::fs::write(&path, summary).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Summary text for a stock, empty when none was written
    pub fn read_summary(&self, stock: &str) -> String {
        read_or_empty(&self.summary_path(stock))
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.data_dir.join(COMPARISON_FILE)
    }

    pub fn write_comparison(&self, text: &str) -> Result<PathBuf> {
        let path = self.comparison_path();
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn read_comparison(&self) -> String {
        read_or_empty(&self.comparison_path())
    }

    /// Location of a chart, `<plots_dir>/<stock>_<suffix>.png`
    pub fn plot_path(&self, stock: &str, suffix: &str) -> PathBuf {
        self.plots_dir.join(format!("{}_{}.png", stock, suffix))
    }

    /// One option per summary file, plus a comparison entry when at least two
    /// stocks exist.
    pub fn available_stocks(&self) -> Result<Vec<StockOption>> {
        let mut keys: Vec<String> = list_dir(&self.data_dir)?
            .into_iter()
            .filter_map(|name| {
                name.strip_suffix(".txt")?
                    .strip_suffix(SUMMARY_SUFFIX)
                    .map(str::to_string)
            })
            .collect();
        keys.sort();

        let mut stocks: Vec<StockOption> = keys
            .into_iter()
            .map(|key| StockOption::new(display_name(&key), key))
            .collect();
        if stocks.len() >= 2 {
            stocks.push(StockOption::new("Comparison", COMPARISON_KEY));
        }
        Ok(stocks)
    }

    /// PNG file names in the plots directory that start with the stock key
    pub fn plots_for(&self, stock: &str) -> Result<Vec<String>> {
        if stock.is_empty() {
            return Ok(Vec::new());
        }
        let mut plots: Vec<String> = list_dir(&self.plots_dir)?
            .into_iter()
            .filter(|name| name.ends_with(".png") && name.starts_with(stock))
            .collect();
        plots.sort();
        Ok(plots)
    }
}

/// Display label for a stock key: `_clean` dropped, first letter upper-cased,
/// the rest lower-cased.
pub fn display_name(key: &str) -> String {
    let stripped = key.replace("_clean", "");
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn read_or_empty(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        debug!("No artifact at {}: {}", path.display(), e);
        String::new()
    })
}

fn list_dir(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
