//! Derived columns: returns and moving averages

use crate::data::PriceFrame;
use crate::error::Result;
use crate::indicators::calculate_sma;

pub const CLOSE: &str = "Close";
pub const DAILY_RETURN: &str = "Daily_Return";
pub const LOG_RETURN: &str = "Log_Return";

/// Moving average windows appended by [`feature_engineer`]
pub const MA_PERIODS: [usize; 3] = [20, 50, 200];

pub fn ma_column(period: usize) -> String {
    format!("MA_{}", period)
}

/// Carry the last present value forward in every column
pub fn forward_fill(frame: &mut PriceFrame) {
    for column in frame.columns_mut() {
        let mut last = None;
        for cell in column.values.iter_mut() {
            match cell {
                Some(v) => last = Some(*v),
                None => *cell = last,
            }
        }
    }
}

/// Percent change against the previous row
pub fn pct_change(values: &[Option<f64>]) -> Vec<Option<f64>> {
    pairwise(values, |prev, cur| {
        if prev == 0.0 {
            None
        } else {
            Some(cur / prev - 1.0)
        }
    })
}

/// Difference of natural logs against the previous row
pub fn log_return(values: &[Option<f64>]) -> Vec<Option<f64>> {
    pairwise(values, |prev, cur| {
        if prev > 0.0 && cur > 0.0 {
            Some(cur.ln() - prev.ln())
        } else {
            None
        }
    })
}

fn pairwise<F>(values: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> Option<f64>,
{
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|w| match (w[0], w[1]) {
        (Some(prev), Some(cur)) => f(prev, cur),
        _ => None,
    }));
    out
}

/// Forward-fill a copy of the frame and append return and moving-average
/// columns when `Close` is present.
pub fn feature_engineer(frame: &PriceFrame) -> Result<PriceFrame> {
    let mut out = frame.clone();
    forward_fill(&mut out);

    let close = match out.values(CLOSE) {
        Some(close) => close.to_vec(),
        None => return Ok(out),
    };

    out.insert_column(DAILY_RETURN, pct_change(&close));
    out.insert_column(LOG_RETURN, log_return(&close));
    for period in MA_PERIODS {
        out.insert_column(ma_column(period), calculate_sma(&close, period)?);
    }
    Ok(out)
}
