//! Descriptive statistics, correlations and the summary text

use crate::data::PriceFrame;
use crate::features::{CLOSE, DAILY_RETURN};

/// Trading days per year used to annualize volatility
pub const TRADING_DAYS: f64 = 252.0;

/// Count, moments and quartiles of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    /// Summarize a sample. NaN inputs are ignored.
    pub fn of(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        if sorted.is_empty() {
            return Self {
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        Self {
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        }
    }

    fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }

    /// Render as aligned `label  value` lines
    pub fn to_table(&self) -> String {
        let formatted: Vec<(&str, String)> = self
            .rows()
            .iter()
            .map(|(label, v)| (*label, format!("{:.6}", v)))
            .collect();
        let width = formatted.iter().map(|(_, v)| v.len()).max().unwrap_or(0) + 2;
        formatted
            .iter()
            .map(|(label, v)| format!("{:<5}  {:>width$}", label, v, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile of an ascending slice
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Standard deviation of returns scaled to a year of trading days
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    sample_std(returns) * TRADING_DAYS.sqrt()
}

/// Pearson correlation over rows where both sides are present
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

/// Pairwise correlation matrix for the named columns that exist in the frame.
///
/// Returns the columns actually used alongside the matrix.
pub fn correlation_matrix(frame: &PriceFrame, names: &[&str]) -> (Vec<String>, Vec<Vec<f64>>) {
    let cols: Vec<(&str, &[Option<f64>])> = names
        .iter()
        .filter_map(|n| frame.values(n).map(|v| (*n, v)))
        .collect();
    let matrix = cols
        .iter()
        .map(|(_, a)| cols.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();
    (cols.iter().map(|(n, _)| n.to_string()).collect(), matrix)
}

fn present(frame: &PriceFrame, name: &str) -> Option<Vec<f64>> {
    frame.column(name).map(|c| c.present())
}

/// Human-readable summary of the frame's span, Close and returns
pub fn descriptive_stats(frame: &PriceFrame) -> String {
    let fmt_date = |d: Option<chrono::NaiveDateTime>| {
        d.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "NaT".to_string())
    };

    let mut parts: Vec<String> = vec![
        "Basic info:\n".to_string(),
        format!(
            "Start: {}\nEnd: {}\nRows: {}\n",
            fmt_date(frame.first_date()),
            fmt_date(frame.last_date()),
            frame.len()
        ),
    ];

    if let Some(close) = present(frame, CLOSE) {
        parts.push("\nClose price stats:\n".to_string());
        parts.push(Describe::of(&close).to_table());
        parts.push("\n\n".to_string());
    }

    if let Some(returns) = present(frame, DAILY_RETURN) {
        parts.push("Returns stats:\n".to_string());
        parts.push(Describe::of(&returns).to_table());
        parts.push(format!(
            "\nAnnualized volatility (approx): {:.4}\n",
            annualized_volatility(&returns)
        ));
    }

    parts.join("\n")
}

/// Close-price statistics for one side of a pairwise comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonStats {
    pub label: String,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub annual_volatility: Option<f64>,
}

impl ComparisonStats {
    pub fn of(label: &str, frame: &PriceFrame) -> Self {
        let close = present(frame, CLOSE).unwrap_or_default();
        let describe = Describe::of(&close);
        Self {
            label: label.to_string(),
            mean: describe.mean,
            std: describe.std,
            min: describe.min,
            max: describe.max,
            annual_volatility: present(frame, DAILY_RETURN).map(|r| annualized_volatility(&r)),
        }
    }
}

/// Compare two engineered frames, in argument order
pub fn compare_stocks(
    a: &PriceFrame,
    b: &PriceFrame,
    label_a: &str,
    label_b: &str,
) -> Vec<ComparisonStats> {
    vec![ComparisonStats::of(label_a, a), ComparisonStats::of(label_b, b)]
}

/// Render comparison stats as `<label> stats:` blocks
pub fn format_comparison(stats: &[ComparisonStats]) -> String {
    let mut out = String::new();
    for s in stats {
        out.push_str(&format!("{} stats:\n", s.label));
        out.push_str(&format!("  mean: {}\n", s.mean));
        out.push_str(&format!("  std: {}\n", s.std));
        out.push_str(&format!("  min: {}\n", s.min));
        out.push_str(&format!("  max: {}\n", s.max));
        match s.annual_volatility {
            Some(v) => out.push_str(&format!("  annual_volatility: {}\n", v)),
            None => out.push_str("  annual_volatility: None\n"),
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn frame(columns: Vec<Column>) -> PriceFrame {
        let n = columns[0].values.len();
        let start = NaiveDate::from_ymd_opt(2022, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        PriceFrame::new((0..n).map(|i| start + Duration::days(i as i64)).collect(), columns)
    }

    #[test]
    fn test_describe() {
        let d = Describe::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(d.count, 5);
        assert_relative_eq!(d.mean, 3.0);
        assert_relative_eq!(d.std, 1.5811388300841898, epsilon = 1e-12);
        assert_relative_eq!(d.q25, 2.0);
        assert_relative_eq!(d.q50, 3.0);
        assert_relative_eq!(d.q75, 4.0);

        let d = Describe::of(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(d.q25, 1.75);
        assert_relative_eq!(d.q50, 2.5);
    }

    #[test]
    fn test_describe_degenerate() {
        let empty = Describe::of(&[]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());

        let one = Describe::of(&[7.0]);
        assert_eq!(one.count, 1);
        assert!(one.std.is_nan());
        assert_relative_eq!(one.q75, 7.0);
    }

    #[test]
    fn test_describe_table_layout() {
        let table = Describe::of(&[1.0, 2.0, 3.0, 4.0, 5.0]).to_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "count    5.000000");
        assert_eq!(lines[4], "25%      2.000000");
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_pearson() {
        let a = [Some(1.0), Some(2.0), Some(3.0), None];
        let b = [Some(2.0), Some(4.0), Some(6.0), Some(1.0)];
        let c = [Some(3.0), Some(2.0), Some(1.0), Some(0.0)];
        assert_relative_eq!(pearson(&a, &b), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&a, &c), -1.0, epsilon = 1e-12);
        assert!(pearson(&[Some(1.0), Some(1.0)], &[Some(1.0), Some(2.0)]).is_nan());
    }

    #[test]
    fn test_correlation_matrix_skips_missing_columns() {
        let f = frame(vec![
            Column::new("Open", vec![Some(1.0), Some(2.0), Some(4.0)]),
            Column::new("Close", vec![Some(2.0), Some(3.0), Some(5.0)]),
        ]);
        let (names, m) = correlation_matrix(&f, &["Open", "High", "Close"]);
        assert_eq!(names, vec!["Open", "Close"]);
        assert_relative_eq!(m[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[0][1], m[1][0]);
    }

    #[test]
    fn test_descriptive_stats_text() {
        let f = frame(vec![
            Column::new("Close", vec![Some(10.0), Some(11.0), Some(12.1)]),
            Column::new("Daily_Return", vec![None, Some(0.1), Some(0.1)]),
        ]);
        let text = descriptive_stats(&f);
        assert!(text.starts_with("Basic info:\n\nStart: 2022-01-03 00:00:00\nEnd: 2022-01-05 00:00:00\nRows: 3\n"));
        assert!(text.contains("Close price stats:"));
        assert!(text.contains("Returns stats:"));
        assert!(text.contains("Annualized volatility (approx): 0.0000"));
    }

    #[test]
    fn test_format_comparison() {
        let f = frame(vec![Column::new("Close", vec![Some(1.0), Some(3.0)])]);
        let stats = compare_stocks(&f, &f, "A", "B");
        let text = format_comparison(&stats);
        assert!(text.starts_with("A stats:\n  mean: 2\n"));
        assert!(text.contains("  annual_volatility: None\n\nB stats:"));
    }
}
