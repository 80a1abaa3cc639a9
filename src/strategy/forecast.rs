// src/strategy/forecast.rs

use crate::strategy::traits::DemandForecaster;

/// Point estimate plus spread of weekly demand for one SKU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandEstimate {
    pub forecast: f64,
    pub variability: f64,
}

// =========================================================================
// Simple Exponential Smoothing
// =========================================================================

/// Recency-weighted average with no trend or seasonality term.
///
/// The estimate starts at the first observation and each later week pulls
/// it towards the actual value by `alpha`.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

impl ExponentialSmoothing {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl DemandForecaster for ExponentialSmoothing {
    fn forecast(&self, history: &[f64]) -> f64 {
        let Some((&first, rest)) = history.split_first() else {
            return 0.0;
        };

        rest.iter()
            .fold(first, |level, &actual| self.alpha * actual + (1.0 - self.alpha) * level)
    }
}

/// Sample standard deviation (divisor n - 1). Zero for fewer than two points.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Forecasts the window with `forecaster` and measures its spread on the raw values.
pub fn estimate(forecaster: &dyn DemandForecaster, window: &[f64]) -> DemandEstimate {
    DemandEstimate {
        forecast: forecaster.forecast(window),
        variability: sample_std_dev(window),
    }
}
