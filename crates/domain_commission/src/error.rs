//! Commission domain errors
//!
//! The allocation engine itself never fails; these errors come from editing
//! sessions and strict decoding at the edges.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the commission domain
#[derive(Debug, Error)]
pub enum CommissionError {
    #[error("A deal needs at least one commission line")]
    LastLine,

    #[error("No commission line at index {index} ({len} lines)")]
    LineIndexOutOfRange { index: usize, len: usize },

    #[error("Commission lines do not add up to the deal value (difference {difference})")]
    Unbalanced { difference: Decimal },

    #[error("Malformed stored commission configuration: {0}")]
    MalformedStoredConfig(String),

    #[error("Unknown calculation model: {0}")]
    UnknownModel(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
