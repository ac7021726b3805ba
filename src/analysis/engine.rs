use crate::analysis::forecast::{self, ErrorMetrics, ForecastTable};
use crate::analysis::returns::{self, SeriesWithReturns};
use crate::analysis::stats::{self, DescriptiveStats};
use crate::core::error::Result;
use crate::core::series::RateSeries;
use log::debug;

/// The analysis pipeline over a loaded rate series.
///
/// Every stage is a pure function of its input; the engine holds no state
/// and may be used from any number of threads at once.
pub struct AnalysisEngine;

impl AnalysisEngine {
    /// Daily percentage returns; the first date's return is absent.
    pub fn compute_returns(series: &RateSeries) -> Result<SeriesWithReturns> {
        let with_returns = returns::compute_returns(series)?;
        debug!("computed {} daily returns", with_returns.returns().len());
        Ok(with_returns)
    }

    /// Mean, standard deviation, min and max of the rates, plus mean and
    /// standard deviation of the returns.
    pub fn compute_descriptive_stats(series: &SeriesWithReturns) -> Result<DescriptiveStats> {
        stats::compute_descriptive_stats(series)
    }

    /// Naive one-step-ahead forecast table and its RMSE.
    pub fn naive_forecast(series: &RateSeries) -> Result<(ForecastTable, f64)> {
        let (table, rmse) = forecast::naive_forecast(series)?;
        debug!("naive forecast over {} rows, rmse {:.6}", table.len(), rmse);
        Ok((table, rmse))
    }

    /// Mean absolute error, mean error and per-date errors of `table`.
    pub fn forecast_errors(table: &ForecastTable) -> Result<ErrorMetrics> {
        forecast::forecast_errors(table)
    }
}
