//! Integration tests for the analyzer pipeline

use std::path::{Path, PathBuf};

use analyzer::data::load_stock_data;
use analyzer::features::{feature_engineer, CLOSE, DAILY_RETURN};
use analyzer::pipeline::{analyze_stock, find_stock_csvs, run};
use analyzer::plot::suffix;
use analyzer::stats::pearson;
use analyzer::AnalysisError;
use chrono::{Duration, NaiveDate};
use shared::ArtifactStore;

/// Every per-stock chart suffix
const CHART_SUFFIXES: [&str; 7] = [
    suffix::PRICE_MA,
    suffix::VOLUME,
    suffix::RETURNS_HIST,
    suffix::RETURNS_BOX,
    suffix::MONTHLY_CLOSE,
    suffix::CORRELATION,
    suffix::SEASONAL_DECOMPOSE,
];

/// Helper writing a daily OHLCV CSV with a gently rising close
fn write_stock_csv(dir: &Path, file: &str, days: usize, base_price: f64) -> PathBuf {
    write_csv(dir, file, days, base_price, true)
}

fn write_csv(dir: &Path, file: &str, days: usize, base_price: f64, with_volume: bool) -> PathBuf {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    let mut text = String::from("Date,Open,High,Low,Close");
    text.push_str(if with_volume { ",Volume\n" } else { "\n" });
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let close = base_price + i as f64 * 0.5 + (i % 7) as f64 * 0.25;
        text.push_str(&format!(
            "{},{},{},{},{}",
            date.format("%Y-%m-%d"),
            close - 0.3,
            close + 1.0,
            close - 1.0,
            close
        ));
        if with_volume {
            text.push_str(&format!(",{}", 1000 + i * 10));
        }
        text.push('\n');
    }
    let path = dir.join(file);
    std::fs::write(&path, text).unwrap();
    path
}

fn store_in(dir: &Path) -> ArtifactStore {
    ArtifactStore::new(dir, dir.join("plots"))
}

#[test]
fn test_single_stock_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_stock_csv(dir.path(), "netflix_5yr_one.csv", 60, 100.0);
    let store = store_in(dir.path());
    store.ensure_dirs().unwrap();

    let analysis = analyze_stock(&csv, &store).unwrap();
    assert_eq!(analysis.name, "netflix");
    assert_eq!(analysis.frame.len(), 60);

    let summary = store.read_summary("netflix");
    assert!(summary.starts_with("Basic info:\n"));
    assert!(summary.contains("Start: 2021-01-04 00:00:00"));
    assert!(summary.contains("Rows: 60"));
    assert!(summary.contains("Close price stats:"));
    assert!(summary.contains("Annualized volatility (approx): "));
}

#[test]
fn test_two_stocks_write_comparison() {
    let dir = tempfile::tempdir().unwrap();
    write_stock_csv(dir.path(), "google_stock_data.csv", 40, 50.0);
    write_stock_csv(dir.path(), "amazon.csv", 40, 80.0);
    let store = store_in(dir.path());

    let csvs = find_stock_csvs(dir.path()).unwrap();
    let report = run(&csvs, &store).unwrap();

    assert_eq!(report.stock_names(), vec!["amazon", "Google"]);
    assert!(report.comparison.is_some());
    assert!(report.format().contains("Comparison written to comparison_stats.txt"));

    let comparison = store.read_comparison();
    assert!(comparison.starts_with("amazon stats:\n  mean: "));
    assert!(comparison.contains("\nGoogle stats:\n"));
    assert!(comparison.contains("  annual_volatility: "));

    // The dashboard lists both stocks plus the comparison entry.
    let keys: Vec<String> = store
        .available_stocks()
        .unwrap()
        .into_iter()
        .map(|s| s.key)
        .collect();
    assert_eq!(keys, vec!["Google", "amazon", "all"]);
}

#[test]
fn test_three_stocks_skip_comparison() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.csv", "b.csv", "c.csv"] {
        write_stock_csv(dir.path(), name, 10, 10.0);
    }
    let store = store_in(dir.path());
    let report = run(&find_stock_csvs(dir.path()).unwrap(), &store).unwrap();
    assert_eq!(report.stocks.len(), 3);
    assert!(report.comparison.is_none());
    assert_eq!(store.read_comparison(), "");
}

#[test]
fn test_missing_date_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Open,Close\n1,2\n").unwrap();
    let store = store_in(dir.path());

    let err = run(&[csv], &store).unwrap_err();
    assert!(matches!(err, AnalysisError::NoDateColumn { .. }));
    assert_eq!(store.read_summary("bad"), "");
}

#[test]
fn test_long_history_renders_every_chart() {
    let dir = tempfile::tempdir().unwrap();
    // Two full years of calendar days so the 365-day decomposition runs.
    let csv = write_stock_csv(dir.path(), "Tesla.csv", 800, 100.0);
    let store = store_in(dir.path());
    store.ensure_dirs().unwrap();

    let analysis = analyze_stock(&csv, &store).unwrap();
    assert_eq!(analysis.plots.len(), CHART_SUFFIXES.len());
    for suffix in CHART_SUFFIXES {
        let path = store.plot_path("Tesla", suffix);
        assert!(path.is_file(), "missing {}", path.display());
        assert!(analysis.plots.contains(&path));
    }
}

#[test]
fn test_missing_volume_skips_only_volume_chart() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "novol.csv", 800, 50.0, false);
    let store = store_in(dir.path());
    store.ensure_dirs().unwrap();

    let analysis = analyze_stock(&csv, &store).unwrap();
    assert!(!store.plot_path("novol", suffix::VOLUME).exists());
    for suffix in CHART_SUFFIXES.iter().filter(|s| **s != suffix::VOLUME) {
        assert!(store.plot_path("novol", suffix).is_file(), "missing {}", suffix);
    }
    assert_eq!(analysis.plots.len(), CHART_SUFFIXES.len() - 1);
}

#[test]
fn test_comparison_chart_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_stock_csv(dir.path(), "amazon.csv", 30, 80.0);
    write_stock_csv(dir.path(), "netflix.csv", 30, 40.0);
    let store = store_in(dir.path());

    let report = run(&find_stock_csvs(dir.path()).unwrap(), &store).unwrap();
    let expected = store.plots_dir().join("amazon_vs_netflix.png");
    assert!(expected.is_file());
    assert_eq!(report.comparison_plot, Some(expected));
    assert!(report.format().contains("amazon_vs_netflix.png"));
}

#[test]
fn test_nan_cells_are_forward_filled() {
    let dir = tempfile::tempdir().unwrap();
    let start = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
    let mut text = String::from("Date,Open,Close\n");
    for i in 0..25 {
        let close = if i == 2 { "NaN".to_string() } else { format!("{}", 10.0 + i as f64) };
        let date = start + Duration::days(i);
        text.push_str(&format!("{},{},{}\n", date.format("%Y-%m-%d"), 9.5 + i as f64, close));
    }
    let csv = dir.path().join("gappy.csv");
    std::fs::write(&csv, text).unwrap();

    let raw = load_stock_data(&csv).unwrap();
    assert_eq!(raw.values(CLOSE).unwrap()[2], None);

    let frame = feature_engineer(&raw).unwrap();
    let close = frame.values(CLOSE).unwrap();
    assert_eq!(close[2], Some(11.0));
    assert_eq!(frame.values(DAILY_RETURN).unwrap()[2], Some(0.0));
    assert!(frame.values("MA_20").unwrap()[24].unwrap().is_finite());
    assert!(pearson(frame.values("Open").unwrap(), close).is_finite());
}
