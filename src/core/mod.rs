//! Foundational types: the rate series, the trading-day calendar and the
//! error taxonomy shared by generation and analysis.

pub mod calendar;
pub mod error;
pub mod series;
