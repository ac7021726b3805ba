//! Loading collaborators: CSV persistence, live quotes, the fallback
//! loader and an explicit series cache.

pub mod cache;
pub mod csv_store;
pub mod loader;
pub mod quotes;

use crate::core::error::AnalysisError;
use thiserror::Error;

/// Errors from reading, writing or preparing a rate series.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
