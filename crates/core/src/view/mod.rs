//! View orchestration.
//!
//! This module ties the normalizer, aggregator and formatter together for the
//! views the presentation layer offers:
//! - Category totals for a single date, an entire month or every day of a month
//! - Per-category entry lists mixing regular and employee expenses
//! - Daily totals of a month
//! - Entries whose category matches no known category

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ViewError;
pub use service::ReportService;
pub use types::*;
