//! Source error types.

use thiserror::Error;

use crate::category::CategoryError;

/// Errors raised by an expense source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend could not be reached.
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The backend's response could not be decoded.
    #[error("Invalid backend response: {0}")]
    Decode(String),

    /// A category mutation was rejected.
    #[error(transparent)]
    Category(#[from] CategoryError),
}

impl SourceError {
    /// Returns true if the backend reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status { status: 404, .. } | Self::Category(CategoryError::NotFound(_))
        )
    }
}
