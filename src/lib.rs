//! # fx-forecast
//!
//! EUR/USD daily rate analysis with a naive one-step-ahead forecast.
//!
//! Given a daily rate series (loaded from disk, anchored to a live quote,
//! or synthesized), this crate computes daily returns and descriptive
//! statistics, forecasts each day with the previous day's rate, and scores
//! that forecast against the realized values.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: rate series, weekday calendar, errors
//! - **simulation**: Synthetic history: forward and anchored backward random walks
//! - **analysis**: Returns, descriptive statistics, naive forecast, error metrics
//! - **data**: CSV persistence, live quote sources, fallback loader, series cache
//! - **report**: The assembled analysis for display or JSON output
//! - **config**: Application settings

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::engine::AnalysisEngine;
    pub use crate::analysis::forecast::{ErrorMetrics, ForecastRow, ForecastTable};
    pub use crate::analysis::returns::{ReturnPoint, SeriesWithReturns};
    pub use crate::analysis::stats::DescriptiveStats;
    pub use crate::core::error::AnalysisError;
    pub use crate::core::series::{RatePoint, RateSeries};
    pub use crate::report::{AnalysisReport, ReportOptions};
    pub use crate::simulation::generator::{GeneratorConfig, SeriesGenerator};
}
