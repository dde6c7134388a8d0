//! View error types.

use thiserror::Error;

/// Errors raised when a view request cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The single-date view was requested without a date.
    #[error("A date is required for the single date view")]
    MissingDate,

    /// A month view was requested without a month.
    #[error("A month is required for this view")]
    MissingMonth,

    /// The mode name is not recognized.
    #[error("Unknown view mode: {0}")]
    UnknownMode(String),

    /// The category is not in the known list.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The category is a sentinel and owns no entries.
    #[error("Category {0} does not hold entries")]
    SentinelCategory(String),
}
