//! Backend expense records and the record normalizer.
//!
//! Raw records arrive in the backend's JSON shape with every field optional.
//! The normalizer turns each one into a canonical `NormalizedRecord` or
//! rejects it; rejected records are skipped by every aggregation.

pub mod error;
mod lenient;
pub mod normalize;
pub mod types;

pub use error::RecordError;
pub use normalize::{NormalizedRecord, RecordNormalizer, coerce_amount, parse_date};
pub use types::{EmployeeExpense, Expense, RecordSnapshot, amount_value};
