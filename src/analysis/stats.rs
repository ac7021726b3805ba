use crate::analysis::returns::SeriesWithReturns;
use crate::core::error::{AnalysisError, Result};
use crate::core::series::RateSeries;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a rate series and its daily returns.
///
/// Standard deviations use the sample (n - 1) denominator. Return
/// statistics are in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub mean_return: f64,
    pub std_dev_return: f64,
}

impl DescriptiveStats {
    /// Rate statistics of a series that carries no return field.
    ///
    /// Return statistics default to 0 rather than failing.
    pub fn from_rates(series: &RateSeries) -> Result<Self> {
        series.require_len(1, "descriptive statistics")?;
        Ok(Self::from_values(&series.rates(), &[]))
    }

    fn from_values(rates: &[f64], returns: &[f64]) -> Self {
        let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
        let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean: mean(rates),
            std_dev: sample_std_dev(rates),
            min,
            max,
            mean_return: mean(returns),
            std_dev_return: sample_std_dev(returns),
        }
    }
}

/// Aggregate the rate and return columns of `series`.
///
/// Absent returns are skipped; with no present return both return
/// statistics are 0.
pub fn compute_descriptive_stats(series: &SeriesWithReturns) -> Result<DescriptiveStats> {
    if series.is_empty() {
        return Err(AnalysisError::invalid(
            "descriptive statistics need at least 1 point, got 0",
        ));
    }
    Ok(DescriptiveStats::from_values(
        &series.rates(),
        &series.returns(),
    ))
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; 0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
