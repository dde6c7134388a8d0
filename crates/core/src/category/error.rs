//! Category error types.

use thiserror::Error;

/// Errors raised by category list mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Category name is empty or whitespace.
    #[error("Category name cannot be empty")]
    EmptyName,

    /// A category with the same name (ignoring case) already exists.
    #[error("Category already exists: {0}")]
    Duplicate(String),

    /// No category with this name exists.
    #[error("Category not found: {0}")]
    NotFound(String),

    /// Sentinel categories cannot be renamed or removed.
    #[error("Category {0} is reserved and cannot be changed")]
    Reserved(String),
}
