//! Expense aggregation.
//!
//! One parametrized group-by replaces the per-view aggregation code:
//! - Group by calendar day, by "<Month> Total", or by category
//! - Employee expenses collapse per (day, category) before grouping
//! - Sentinel and unmatched categories never reach a category sum

pub mod employee;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use employee::collapse_employee_expenses;
pub use service::AggregationService;
pub use types::{
    AggregateRow, CustomerEntry, EmployeeAggregate, GroupBy, GroupKey, RecordFilter,
};
