//! Totals formatting.
//!
//! Turns aggregate rows into the table the presentation layer renders:
//! one column per group key, one row per displayed category, with row,
//! column and grand totals.

pub mod format;
pub mod types;

pub use format::format_totals;
pub use types::{CategoryFilter, FormattedRow, FormattedTotals, TotalsTable};
