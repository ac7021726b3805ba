use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by series validation, generation and analysis.
///
/// Both variants are detected before any randomized computation starts,
/// so a failing call never produces partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Malformed series or parameters: non-positive or non-finite rates,
    /// unsorted or duplicate dates, too few rows for the requested operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A generation range that contains no Monday to Friday date.
    #[error("date range {start} to {end} contains no weekdays")]
    DegenerateRange { start: NaiveDate, end: NaiveDate },
}

impl AnalysisError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
