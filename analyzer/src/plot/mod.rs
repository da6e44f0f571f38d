//! PNG charts rendered with `plotters`
//!
//! Every chart function returns `Ok(None)` when the columns it needs are
//! missing, and the written path otherwise.

pub mod correlation;
pub mod price;
pub mod returns;
pub mod seasonal;

pub use correlation::*;
pub use price::*;
pub use returns::*;
pub use seasonal::*;

use std::ops::Range;

use chrono::{Duration, NaiveDateTime};
use plotters::style::RGBColor;

/// Matplotlib's default cycle, first entries
pub const PALETTE: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

pub const FONT: &str = "sans-serif";

/// Chart suffixes, `<stock>_<suffix>.png`
pub mod suffix {
    pub const PRICE_MA: &str = "price_ma";
    pub const VOLUME: &str = "volume";
    pub const RETURNS_HIST: &str = "returns_hist";
    pub const RETURNS_BOX: &str = "returns_box";
    pub const MONTHLY_CLOSE: &str = "monthly_close";
    pub const CORRELATION: &str = "correlation";
    pub const SEASONAL_DECOMPOSE: &str = "seasonal_decompose";
}

/// Fractional days since `origin`, used as the x coordinate of time charts
pub fn day_offset(origin: NaiveDateTime, at: NaiveDateTime) -> f64 {
    (at - origin).num_seconds() as f64 / 86_400.0
}

/// Inverse of [`day_offset`], formatted for an axis label
pub fn date_label(origin: NaiveDateTime, x: f64) -> String {
    let at = origin + Duration::seconds((x * 86_400.0).round() as i64);
    at.format("%Y-%m-%d").to_string()
}

/// Padded range covering every value; a flat or empty input still yields a
/// non-empty range.
pub fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        return (lo - pad)..(hi + pad);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Split a series into runs of consecutive present points
pub fn segments(xs: &[f64], ys: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (x, y) in xs.iter().zip(ys) {
        match y {
            Some(y) if y.is_finite() => current.push((*x, *y)),
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
