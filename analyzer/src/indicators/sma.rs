//! SMA (Simple Moving Average) indicator

use crate::error::{AnalysisError, Result};
use crate::indicators::Indicator;
use ta::indicators::SimpleMovingAverage;
use ta::{Next, Reset};

/// SMA indicator wrapper
#[derive(Debug, Clone)]
pub struct SMA {
    inner: SimpleMovingAverage,
    name: String,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Result<Self> {
        let inner =
            SimpleMovingAverage::new(period).map_err(|_| AnalysisError::InvalidPeriod(period))?;
        Ok(Self {
            inner,
            name: format!("MA_{}", period),
            period,
            update_count: 0,
            last_value: None,
        })
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.update_count = 0;
        self.last_value = None;
    }
}

/// Calculate SMA over a series with gaps.
///
/// An absent input yields an absent output and restarts the window.
pub fn calculate_sma(values: &[Option<f64>], period: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = SMA::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for value in values {
        match value {
            Some(v) => {
                sma.update(*v);
                results.push(sma.value());
            }
            None => {
                sma.reset();
                results.push(None);
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_indicator() {
        let mut sma = SMA::new(10).unwrap();
        assert_eq!(sma.name(), "MA_10");
        assert_eq!(sma.period(), 10);
        assert!(!sma.is_ready());

        for i in 0..20 {
            sma.update(100.0 + (i as f64 * 0.1));
        }

        assert!(sma.is_ready());
        // mean of 101.0..=101.9
        assert_relative_eq!(sma.value().unwrap(), 101.45, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(SMA::new(0), Err(AnalysisError::InvalidPeriod(0))));
    }

    #[test]
    fn test_calculate_sma_warmup_and_gap() {
        let values = [Some(1.0), Some(2.0), Some(3.0), None, Some(5.0), Some(7.0)];
        let out = calculate_sma(&values, 2).unwrap();

        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 1.5);
        assert_relative_eq!(out[2].unwrap(), 2.5);
        assert_eq!(out[3], None);
        assert_eq!(out[4], None);
        assert_relative_eq!(out[5].unwrap(), 6.0);
    }
}
