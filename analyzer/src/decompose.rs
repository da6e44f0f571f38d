//! Classical seasonal decomposition by moving averages

use tracing::warn;

use crate::error::{AnalysisError, Result};

/// Period tried first, in calendar days
pub const MULTIPLICATIVE_PERIOD: usize = 365;
/// Fallback period, in trading days
pub const ADDITIVE_PERIOD: usize = 252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Additive,
    Multiplicative,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Additive => "additive",
            Model::Multiplicative => "multiplicative",
        }
    }
}

/// Trend, seasonal and residual components of a series
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub model: Model,
    pub period: usize,
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub resid: Vec<Option<f64>>,
}

/// Centred moving average of width `period`; a 2 x `period` average when
/// `period` is even. The first and last `period / 2` points are `None`.
pub fn centered_moving_average(series: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = series.len();
    let half = period / 2;
    let weights: Vec<f64> = if period % 2 == 0 {
        let mut w = vec![1.0; period + 1];
        w[0] = 0.5;
        w[period] = 0.5;
        w
    } else {
        vec![1.0; period]
    };
    let scale = period as f64;

    (0..n)
        .map(|i| {
            if i < half || i + half >= n {
                return None;
            }
            let start = i - half;
            let sum: f64 = weights
                .iter()
                .zip(&series[start..start + weights.len()])
                .map(|(w, v)| w * v)
                .sum();
            Some(sum / scale)
        })
        .collect()
}

pub fn seasonal_decompose(series: &[f64], model: Model, period: usize) -> Result<Decomposition> {
    if period < 2 || series.len() < 2 * period {
        return Err(AnalysisError::InsufficientData {
            required: 2 * period.max(2),
            actual: series.len(),
        });
    }
    if model == Model::Multiplicative && series.iter().any(|v| *v <= 0.0) {
        return Err(AnalysisError::NonPositiveValues);
    }

    let trend = centered_moving_average(series, period);
    let detrended: Vec<Option<f64>> = series
        .iter()
        .zip(&trend)
        .map(|(obs, t)| {
            t.map(|t| match model {
                Model::Additive => obs - t,
                Model::Multiplicative => obs / t,
            })
        })
        .collect();

    let mut phase_means: Vec<f64> = (0..period)
        .map(|phase| {
            let vals: Vec<f64> = detrended.iter().skip(phase).step_by(period).flatten().copied().collect();
            if vals.is_empty() {
                f64::NAN
            } else {
                vals.iter().sum::<f64>() / vals.len() as f64
            }
        })
        .collect();
    let overall = phase_means.iter().sum::<f64>() / period as f64;
    for m in phase_means.iter_mut() {
        match model {
            Model::Additive => *m -= overall,
            Model::Multiplicative => *m /= overall,
        }
    }

    let seasonal: Vec<f64> = (0..series.len()).map(|i| phase_means[i % period]).collect();
    let resid = series
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((obs, t), s)| {
            t.map(|t| match model {
                Model::Additive => obs - t - s,
                Model::Multiplicative => obs / (t * s),
            })
        })
        .collect();

    Ok(Decomposition {
        model,
        period,
        observed: series.to_vec(),
        trend,
        seasonal,
        resid,
    })
}

/// Multiplicative yearly decomposition, falling back to an additive one over
/// a trading year.
pub fn decompose_with_fallback(series: &[f64]) -> Result<Decomposition> {
    match seasonal_decompose(series, Model::Multiplicative, MULTIPLICATIVE_PERIOD) {
        Ok(decomposition) => Ok(decomposition),
        Err(err) => {
            warn!("Multiplicative decomposition failed ({}), trying additive", err);
            seasonal_decompose(series, Model::Additive, ADDITIVE_PERIOD)
        }
    }
}
