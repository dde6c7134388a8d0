//! Expense aggregation and reporting engine for Expensebook.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Raw backend records go in, display-ready totals come out.
//!
//! # Modules
//!
//! - `category` - Ordered category list with sentinel handling
//! - `record` - Raw backend records and the record normalizer
//! - `aggregate` - Group-by-day/month/category aggregation and the employee-expense merge
//! - `report` - Totals table formatting
//! - `view` - View orchestration (single date, entire month, all days of month) and entry lists
//! - `source` - Data-access collaborator trait and an in-memory implementation

pub mod aggregate;
pub mod category;
pub mod record;
pub mod report;
pub mod source;
pub mod view;
