//! Totals formatter.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{CategoryFilter, TotalsTable};
use crate::aggregate::{AggregateRow, GroupKey};
use crate::category::CategoryList;

/// Lays aggregate rows out as a totals table.
///
/// Rows are the non-sentinel categories for [`CategoryFilter::All`], or the
/// single filtered category. A category missing from an aggregate row reads
/// as zero. Column totals are the aggregate row totals whatever the filter.
#[must_use]
pub fn format_totals(
    rows: &BTreeMap<GroupKey, AggregateRow>,
    categories: &CategoryList,
    filter: &CategoryFilter,
) -> TotalsTable {
    let columns: Vec<GroupKey> = rows.keys().cloned().collect();
    let row_labels: Vec<String> = match filter {
        CategoryFilter::All => categories.accumulating().map(str::to_string).collect(),
        CategoryFilter::Only(name) => vec![name.clone()],
    };

    let mut cells = Vec::with_capacity(row_labels.len());
    let mut row_totals = Vec::with_capacity(row_labels.len());

    for label in &row_labels {
        let row: Vec<Decimal> = rows.values().map(|aggregate| aggregate.amount(label)).collect();

        let running = rows
            .values()
            .filter_map(|aggregate| aggregate.amounts.get(label.as_str()))
            .fold(Decimal::ZERO, |acc, amount| acc + amount);
        let row_total: Decimal = row.iter().copied().sum();
        debug_assert_eq!(row_total, running, "row total mismatch for {label}");

        cells.push(row);
        row_totals.push(row_total);
    }

    let column_totals: Vec<Decimal> = rows.values().map(|aggregate| aggregate.total).collect();
    let grand_total = column_totals.iter().copied().sum();

    TotalsTable {
        columns,
        row_labels,
        cells,
        row_totals,
        column_totals,
        grand_total,
    }
}
