// File: crates/chart-geometry/src/error.rs
// Summary: Configuration error type. Malformed data never errors; it degrades.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("`{0}` must name a record field")]
    MissingKey(&'static str),
}

pub type Result<T> = std::result::Result<T, ChartError>;
