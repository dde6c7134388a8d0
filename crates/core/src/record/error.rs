//! Record error types.

use thiserror::Error;

/// Reasons a raw record is rejected by the normalizer.
///
/// These never abort an aggregation; the record is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field is absent, null, or blank.
    #[error("Incomplete record: missing {field}")]
    Incomplete {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The date string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
