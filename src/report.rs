//! The assembled analysis handed to the presentation layer.

use crate::analysis::engine::AnalysisEngine;
use crate::analysis::forecast::{ErrorMetrics, ForecastRow, ForecastTable, HistogramBin};
use crate::analysis::returns::SeriesWithReturns;
use crate::analysis::stats::DescriptiveStats;
use crate::core::error::{AnalysisError, Result};
use crate::core::series::RateSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Rows of the recent actual-vs-forecast window.
    pub recent_window: usize,
    pub histogram_bins: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            recent_window: 30,
            histogram_bins: 50,
        }
    }
}

/// Every output of the analysis pipeline for one series.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub points: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub current_rate: f64,
    pub stats: DescriptiveStats,
    pub rmse: f64,
    pub errors: ErrorMetrics,
    pub recent: Vec<ForecastRow>,
    pub histogram: Vec<HistogramBin>,
    #[serde(skip)]
    pub series: SeriesWithReturns,
    #[serde(skip)]
    pub forecast: ForecastTable,
}

impl AnalysisReport {
    /// Run returns, statistics, naive forecast and error metrics in order.
    pub fn build(series: &RateSeries, options: &ReportOptions) -> Result<Self> {
        let with_returns = AnalysisEngine::compute_returns(series)?;
        let stats = AnalysisEngine::compute_descriptive_stats(&with_returns)?;
        let (forecast, rmse) = AnalysisEngine::naive_forecast(series)?;
        let errors = AnalysisEngine::forecast_errors(&forecast)?;
        let histogram = errors.histogram(options.histogram_bins)?;

        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AnalysisError::invalid("report needs a non-empty series")),
        };

        Ok(Self {
            points: series.len(),
            start: first.date,
            end: last.date,
            current_rate: last.rate,
            stats,
            rmse,
            recent: forecast.tail(options.recent_window).to_vec(),
            histogram,
            errors,
            series: with_returns,
            forecast,
        })
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EUR/USD Analysis ===")?;
        writeln!(f, "Points:        {}", self.points)?;
        writeln!(f, "Date Range:    {} to {}", self.start, self.end)?;
        writeln!(f, "Current Rate:  {:.4}", self.current_rate)?;

        writeln!(f, "\nRate Statistics:")?;
        writeln!(f, "  Mean:        {:.4}", self.stats.mean)?;
        writeln!(f, "  Std Dev:     {:.4}", self.stats.std_dev)?;
        writeln!(f, "  Min:         {:.4}", self.stats.min)?;
        writeln!(f, "  Max:         {:.4}", self.stats.max)?;

        writeln!(f, "\nDaily Return Statistics (%):")?;
        writeln!(f, "  Mean:        {:.4}", self.stats.mean_return)?;
        writeln!(f, "  Volatility:  {:.4}", self.stats.std_dev_return)?;

        writeln!(f, "\nNaive Forecast:")?;
        writeln!(f, "  RMSE:        {:.6}", self.rmse)?;
        writeln!(f, "  MAE:         {:.6}", self.errors.mean_absolute_error)?;
        writeln!(f, "  Mean Error:  {:.6}", self.errors.mean_error)?;

        writeln!(f, "\nActual vs Forecast (last {} days):", self.recent.len())?;
        for row in &self.recent {
            writeln!(
                f,
                "  {}  actual {:.4}  forecast {:.4}  error {:+.6}",
                row.date,
                row.actual,
                row.forecast,
                row.error()
            )?;
        }

        writeln!(f, "\nError Distribution:")?;
        let peak = self.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        for bin in &self.histogram {
            let bar = if peak == 0 { 0 } else { bin.count * 40 / peak };
            writeln!(
                f,
                "  [{:+.5}, {:+.5}] {:>4} {}",
                bin.lower,
                bin.upper,
                bin.count,
                "#".repeat(bar)
            )?;
        }
        Ok(())
    }
}
