//! Totals table types.

use rust_decimal::Decimal;
use serde::Serialize;

use expensebook_shared::types::format_amount;

use crate::aggregate::GroupKey;
use crate::category::TOTAL_SENTINEL;

/// Which categories a totals table shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum CategoryFilter {
    /// Every non-sentinel category.
    #[default]
    All,
    /// A single category.
    Only(String),
}

impl CategoryFilter {
    /// Builds a filter from an optional user selection.
    ///
    /// A missing or blank selection, or the `"Total"` sentinel, means all
    /// categories.
    #[must_use]
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.map(str::trim) {
            None | Some("") => Self::All,
            Some(name) if name.eq_ignore_ascii_case(TOTAL_SENTINEL) => Self::All,
            Some(name) => Self::Only(name.to_string()),
        }
    }
}

/// Table-ready totals matrix.
///
/// `cells[r][c]` is the amount of `row_labels[r]` under `columns[c]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TotalsTable {
    /// Group keys in sorted order.
    pub columns: Vec<GroupKey>,
    /// Displayed categories.
    pub row_labels: Vec<String>,
    /// Amounts, one vector per row label.
    pub cells: Vec<Vec<Decimal>>,
    /// Sum of each row across all columns.
    pub row_totals: Vec<Decimal>,
    /// Total of every category under each column, filter or not.
    pub column_totals: Vec<Decimal>,
    /// Sum of all column totals.
    pub grand_total: Decimal,
}

impl TotalsTable {
    /// Returns true if the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders every amount with exactly two decimal digits.
    #[must_use]
    pub fn render(&self) -> FormattedTotals {
        FormattedTotals {
            columns: self.columns.iter().map(ToString::to_string).collect(),
            rows: self
                .row_labels
                .iter()
                .zip(&self.cells)
                .zip(&self.row_totals)
                .map(|((label, cells), total)| FormattedRow {
                    label: label.clone(),
                    cells: cells.iter().copied().map(format_amount).collect(),
                    total: format_amount(*total),
                })
                .collect(),
            column_totals: self.column_totals.iter().copied().map(format_amount).collect(),
            grand_total: format_amount(self.grand_total),
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRow {
    /// Category name.
    pub label: String,
    /// Two-decimal amounts per column.
    pub cells: Vec<String>,
    /// Two-decimal row total.
    pub total: String,
}

/// A totals table with every amount rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    /// Column labels (`YYYY-MM-DD`, `"<Month> Total"` or category names).
    pub columns: Vec<String>,
    /// Rendered rows.
    pub rows: Vec<FormattedRow>,
    /// Two-decimal column totals.
    pub column_totals: Vec<String>,
    /// Two-decimal grand total.
    pub grand_total: String,
}
