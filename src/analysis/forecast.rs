//! One-step-ahead naive forecasting and forecast-error metrics.

use crate::analysis::stats::mean;
use crate::core::error::{AnalysisError, Result};
use crate::core::series::RateSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the forecast-accuracy table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub actual: f64,
    /// The previous date's actual rate.
    pub forecast: f64,
}

impl ForecastRow {
    /// `actual - forecast`.
    pub fn error(&self) -> f64 {
        self.actual - self.forecast
    }
}

/// Forecast-accuracy table: every date except the first, which has no
/// forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn actuals(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.actual).collect()
    }

    pub fn forecasts(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.forecast).collect()
    }

    /// The last `n` rows.
    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    /// Root mean squared error of the table.
    pub fn rmse(&self) -> f64 {
        let squared: Vec<f64> = self.rows.iter().map(|r| r.error().powi(2)).collect();
        mean(&squared).sqrt()
    }
}

/// Naive forecast: the rate at date t is predicted by the rate at t-1.
///
/// Returns the table with the undefined first row dropped, and its RMSE.
/// Fails with `InvalidInput` on fewer than two observations.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_forecast::analysis::forecast::naive_forecast;
/// use fx_forecast::core::series::RateSeries;
///
/// let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
/// let series = RateSeries::from_parts(&[d(2), d(3), d(4)], &[1.10, 1.12, 1.08]).unwrap();
///
/// let (table, rmse) = naive_forecast(&series).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[0].forecast, 1.10);
/// assert!(rmse > 0.0);
/// ```
pub fn naive_forecast(series: &RateSeries) -> Result<(ForecastTable, f64)> {
    series.require_len(2, "naive forecast")?;
    let rows: Vec<ForecastRow> = series
        .points()
        .windows(2)
        .map(|w| ForecastRow {
            date: w[1].date,
            actual: w[1].rate,
            forecast: w[0].rate,
        })
        .collect();
    let table = ForecastTable { rows };
    let rmse = table.rmse();
    Ok((table, rmse))
}

/// Forecast error on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorPoint {
    pub date: NaiveDate,
    pub error: f64,
}

/// Aggregate forecast-error metrics plus the per-date errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub mean_absolute_error: f64,
    pub mean_error: f64,
    pub errors: Vec<ErrorPoint>,
}

/// One equal-width bin of the error distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl ErrorMetrics {
    pub fn values(&self) -> Vec<f64> {
        self.errors.iter().map(|e| e.error).collect()
    }

    /// Distribution of errors over `bins` equal-width bins spanning the
    /// observed range. The maximum lands in the last bin.
    pub fn histogram(&self, bins: usize) -> Result<Vec<HistogramBin>> {
        if bins == 0 {
            return Err(AnalysisError::invalid("histogram needs at least one bin"));
        }
        let values = self.values();
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == min {
            return Ok(vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len(),
            }]);
        }

        let width = (max - min) / bins as f64;
        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();
        for v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            histogram[idx].count += 1;
        }
        Ok(histogram)
    }
}

/// Per-date errors `actual - forecast` and their mean and mean absolute value.
pub fn forecast_errors(table: &ForecastTable) -> Result<ErrorMetrics> {
    if table.is_empty() {
        return Err(AnalysisError::invalid("forecast table is empty"));
    }
    let errors: Vec<ErrorPoint> = table
        .rows()
        .iter()
        .map(|r| ErrorPoint {
            date: r.date,
            error: r.error(),
        })
        .collect();
    let values: Vec<f64> = errors.iter().map(|e| e.error).collect();
    let absolute: Vec<f64> = values.iter().map(|e| e.abs()).collect();
    Ok(ErrorMetrics {
        mean_absolute_error: mean(&absolute),
        mean_error: mean(&values),
        errors,
    })
}
