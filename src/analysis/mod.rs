//! Returns, descriptive statistics, naive forecasting and forecast errors.

pub mod engine;
pub mod forecast;
pub mod returns;
pub mod stats;
