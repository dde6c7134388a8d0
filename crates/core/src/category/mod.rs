//! Expense categories.
//!
//! Categories form an ordered list whose order is the display order of every
//! totals table. Two names are sentinels rather than accumulation buckets:
//! - `"Total"` - the aggregate across all other categories
//! - `"Indirect Exp"` - routes to the category-management view

pub mod error;
pub mod list;

pub use error::CategoryError;
pub use list::{CategoryList, INDIRECT_SENTINEL, TOTAL_SENTINEL, is_sentinel};
