//! Distribution of daily returns: histogram with KDE, and a box plot

use std::path::PathBuf;

use plotters::prelude::*;
use shared::ArtifactStore;

use crate::data::PriceFrame;
use crate::error::Result;
use crate::features::DAILY_RETURN;
use crate::plot::{padded_range, suffix, FONT, PALETTE};
use crate::stats::{quantile_sorted, sample_std};

pub const HISTOGRAM_BINS: usize = 80;
const KDE_POINTS: usize = 200;

/// Equal-width bin edges and counts spanning `[min, max]`
pub fn histogram(values: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if values.is_empty() || bins == 0 {
        return (Vec::new(), Vec::new());
    }
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        // The right edge belongs to the last bin.
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (edges, counts)
}

/// Scott's rule bandwidth for a Gaussian kernel
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    sample_std(values) * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density estimate at `x`
pub fn gaussian_kde(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    if values.is_empty() || !(bandwidth > 0.0) {
        return 0.0;
    }
    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * bandwidth * values.len() as f64);
    values
        .iter()
        .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
        .sum::<f64>()
        * norm
}

/// Box plot geometry under the 1.5 x IQR whisker rule
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.retain(|v| v.is_finite());
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
        let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let whisker_low = inside.clone().fold(f64::INFINITY, f64::min);
        let whisker_high = inside.fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            q1,
            median: quantile_sorted(&sorted, 0.5),
            q3,
            whisker_low,
            whisker_high,
            outliers: sorted
                .iter()
                .copied()
                .filter(|v| *v < low_fence || *v > high_fence)
                .collect(),
        })
    }
}

/// Histogram and box plot of Daily_Return; two files, or none when the
/// column is missing.
pub fn plot_returns_distribution(frame: &PriceFrame, stock: &str, store: &ArtifactStore) -> Result<Vec<PathBuf>> {
    let returns = match frame.column(DAILY_RETURN) {
        Some(column) => column.present(),
        None => return Ok(Vec::new()),
    };
    Ok(vec![
        plot_histogram(&returns, stock, store)?,
        plot_box(&returns, stock, store)?,
    ])
}

fn plot_histogram(returns: &[f64], stock: &str, store: &ArtifactStore) -> Result<PathBuf> {
    let path = store.plot_path(stock, suffix::RETURNS_HIST);
    {
        let root = BitMapBackend::new(&path, (1000, 400)).into_drawing_area();
        root.fill(&WHITE)?;

        let (edges, counts) = histogram(returns, HISTOGRAM_BINS);
        let x_range = padded_range(edges.iter().copied());
        let top = counts.iter().copied().max().unwrap_or(0) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} Histogram of Daily Returns", stock), (FONT, 18))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), 0.0..(top * 1.1).max(1.0))?;
        chart
            .configure_mesh()
            .x_desc(DAILY_RETURN)
            .y_desc("Count")
            .disable_x_mesh()
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            let mut bar = Rectangle::new([(edges[i], 0.0), (edges[i + 1], *c as f64)], PALETTE[0].mix(0.6).filled());
            bar.set_margin(0, 0, 1, 1);
            bar
        }))?;

        // KDE scaled to counts so it overlays the bars.
        let bandwidth = scott_bandwidth(returns);
        if bandwidth > 0.0 && edges.len() > 1 {
            let bin_width = edges[1] - edges[0];
            let scale = returns.len() as f64 * bin_width;
            let step = (x_range.end - x_range.start) / (KDE_POINTS - 1) as f64;
            let curve = (0..KDE_POINTS).map(|i| {
                let x = x_range.start + step * i as f64;
                (x, gaussian_kde(returns, bandwidth, x) * scale)
            });
            chart.draw_series(LineSeries::new(curve, PALETTE[0].stroke_width(2)))?;
        }

        root.present()?;
    }
    Ok(path)
}

fn plot_box(returns: &[f64], stock: &str, store: &ArtifactStore) -> Result<PathBuf> {
    let path = store.plot_path(stock, suffix::RETURNS_BOX);
    {
        let root = BitMapBackend::new(&path, (600, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} Returns Boxplot", stock), (FONT, 18))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(10)
            .build_cartesian_2d(padded_range(returns.iter().copied()), 0.0..1.0)?;
        chart
            .configure_mesh()
            .x_desc(DAILY_RETURN)
            .y_labels(0)
            .disable_y_mesh()
            .draw()?;

        if let Some(b) = BoxStats::of(returns) {
            let (bottom, top, mid) = (0.3, 0.7, 0.5);
            let edge = BLACK.stroke_width(1);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(b.q1, bottom), (b.q3, top)],
                PALETTE[0].mix(0.7).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new([(b.q1, bottom), (b.q3, top)], edge)))?;
            let strokes = vec![
                vec![(b.median, bottom), (b.median, top)],
                vec![(b.whisker_low, mid), (b.q1, mid)],
                vec![(b.q3, mid), (b.whisker_high, mid)],
                vec![(b.whisker_low, 0.4), (b.whisker_low, 0.6)],
                vec![(b.whisker_high, 0.4), (b.whisker_high, 0.6)],
            ];
            chart.draw_series(strokes.into_iter().map(|pts| PathElement::new(pts, edge)))?;
            chart.draw_series(
                b.outliers
                    .iter()
                    .map(|v| Circle::new((*v, mid), 3, BLACK.stroke_width(1))),
            )?;
        }

        root.present()?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [0.0, 0.1, 0.2, 0.3, 1.0];
        let (edges, counts) = histogram(&values, 4);
        assert_eq!(edges.len(), 5);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
        assert_eq!(counts[3], 1);
        assert_eq!(counts[0], 3);
    }

    #[test]
    fn test_histogram_constant_input() {
        let (edges, counts) = histogram(&[2.0, 2.0], 10);
        assert_eq!(edges.len(), 11);
        assert_eq!(counts.iter().sum::<usize>(), 2);
        assert!(histogram(&[], 10).0.is_empty());
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [-0.02, -0.01, 0.0, 0.01, 0.03];
        let bw = scott_bandwidth(&values);
        let step = 0.0005;
        let area: f64 = (0..800)
            .map(|i| gaussian_kde(&values, bw, -0.2 + step * i as f64) * step)
            .sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_box_stats_outliers() {
        let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        values.push(100.0);
        let b = BoxStats::of(&values).unwrap();
        assert_relative_eq!(b.q1, 3.25);
        assert_relative_eq!(b.median, 5.5);
        assert_relative_eq!(b.q3, 7.75);
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 9.0);
        assert_eq!(b.outliers, vec![100.0]);
        assert!(BoxStats::of(&[]).is_none());
    }
}
