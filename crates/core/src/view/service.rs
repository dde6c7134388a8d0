//! Report service.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::debug;

use expensebook_shared::types::Month;

use super::error::ViewError;
use super::types::{
    CategoryEntries, DailyTotal, DisplayEntry, ExpenseEntry, ReportContext, ViewMode, ViewRequest,
};
use crate::aggregate::{
    AggregateRow, AggregationService, GroupBy, GroupKey, RecordFilter, collapse_employee_expenses,
};
use crate::category::is_sentinel;
use crate::record::{Expense, RecordSnapshot};
use crate::report::{CategoryFilter, TotalsTable, format_totals};

/// Service answering view requests over a record snapshot.
///
/// Every operation is a pure function of its inputs: the same context and
/// snapshot always produce the same result.
pub struct ReportService;

impl ReportService {
    /// Computes the category totals table for a view request.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::MissingDate` or `ViewError::MissingMonth` when the
    /// mode lacks its input, and `ViewError::UnknownCategory` when the
    /// category filter names no known non-sentinel category.
    pub fn compute_category_totals(
        ctx: &ReportContext,
        snapshot: &RecordSnapshot,
        request: &ViewRequest,
    ) -> Result<TotalsTable, ViewError> {
        let category = Self::resolve_filter(ctx, &request.category)?;

        let (group_by, filter) = match request.mode {
            ViewMode::SingleDate => {
                let date = request.date.ok_or(ViewError::MissingDate)?;
                (GroupBy::Day, RecordFilter::day(date))
            }
            ViewMode::EntireMonth => {
                let month = request.month.ok_or(ViewError::MissingMonth)?;
                (GroupBy::Month, RecordFilter::month(month))
            }
            ViewMode::AllDaysOfMonth => {
                let month = request.month.ok_or(ViewError::MissingMonth)?;
                (GroupBy::Day, RecordFilter::month(month))
            }
        };

        let mut rows = AggregationService::aggregate_all(
            &snapshot.expenses,
            &snapshot.employee_expenses,
            &ctx.normalizer(),
            group_by,
            &filter,
        );

        if let (ViewMode::EntireMonth, Some(month)) = (request.mode, filter.month) {
            rows.entry(GroupKey::MonthTotal(month))
                .or_insert_with(|| AggregateRow::seeded(&ctx.categories));
        }

        debug!(
            mode = ?request.mode,
            columns = rows.len(),
            "computed category totals"
        );

        Ok(format_totals(&rows, &ctx.categories, &category))
    }

    /// Lists the entries of one category, newest first.
    ///
    /// Regular expenses appear one by one; employee expenses appear as one
    /// aggregate per day.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::UnknownCategory` if `category` is not in the known
    /// list, and `ViewError::SentinelCategory` if it is a sentinel.
    pub fn compute_category_entries(
        ctx: &ReportContext,
        snapshot: &RecordSnapshot,
        category: &str,
    ) -> Result<CategoryEntries, ViewError> {
        let canonical = ctx
            .categories
            .lookup(category)
            .ok_or_else(|| ViewError::UnknownCategory(category.trim().to_string()))?;
        if is_sentinel(canonical) {
            return Err(ViewError::SentinelCategory(canonical.to_string()));
        }

        let entries =
            Self::collect_entries(ctx, snapshot, |matched| matched == Some(canonical));

        let mut result = CategoryEntries {
            category: canonical.to_string(),
            entries: Vec::with_capacity(entries.len()),
            regular_count: 0,
            regular_total: Decimal::ZERO,
            employee_count: 0,
            employee_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        };
        for entry in entries {
            if entry.is_employee() {
                result.employee_count += 1;
                result.employee_total += entry.amount();
            } else {
                result.regular_count += 1;
                result.regular_total += entry.amount();
            }
            result.entries.push(entry);
        }
        result.grand_total = result.regular_total + result.employee_total;

        Ok(result)
    }

    /// Per-day totals of regular expenses booked in `month`, in day order.
    #[must_use]
    pub fn compute_daily_totals(
        ctx: &ReportContext,
        month: Month,
        expenses: &[Expense],
    ) -> Vec<DailyTotal> {
        AggregationService::aggregate_all(
            expenses,
            &[],
            &ctx.normalizer(),
            GroupBy::Day,
            &RecordFilter::month(month),
        )
        .into_iter()
        .filter_map(|(key, row)| match key {
            GroupKey::Day(day) => Some(DailyTotal {
                day,
                per_category: row.amounts,
                total: row.total,
            }),
            GroupKey::MonthTotal(_) | GroupKey::Category(_) => None,
        })
        .collect()
    }

    /// Lists well-formed entries whose category matches no known category,
    /// newest first.
    #[must_use]
    pub fn unmatched_entries(ctx: &ReportContext, snapshot: &RecordSnapshot) -> Vec<DisplayEntry> {
        Self::collect_entries(ctx, snapshot, |matched| matched.is_none())
    }

    fn resolve_filter(
        ctx: &ReportContext,
        filter: &CategoryFilter,
    ) -> Result<CategoryFilter, ViewError> {
        match filter {
            CategoryFilter::All => Ok(CategoryFilter::All),
            CategoryFilter::Only(name) => ctx
                .categories
                .lookup(name)
                .filter(|canonical| !is_sentinel(canonical))
                .map(|canonical| CategoryFilter::Only(canonical.to_string()))
                .ok_or_else(|| ViewError::UnknownCategory(name.clone())),
        }
    }

    /// Regular expenses and employee aggregates whose matched category
    /// satisfies `keep`, sorted for display.
    fn collect_entries(
        ctx: &ReportContext,
        snapshot: &RecordSnapshot,
        keep: impl Fn(Option<&str>) -> bool,
    ) -> Vec<DisplayEntry> {
        let normalizer = ctx.normalizer();

        let regular = snapshot.expenses.iter().filter_map(|expense| {
            let record = normalizer
                .expense(expense)
                .inspect_err(|error| debug!(id = ?expense.id, %error, "skipping expense"))
                .ok()?;
            keep(record.category_matched.as_deref()).then(|| {
                DisplayEntry::Regular(ExpenseEntry {
                    id: expense.id.clone(),
                    date: record.date,
                    month: record.month,
                    amount: record.amount,
                    category: record.category,
                    description: expense.description.clone(),
                })
            })
        });

        let employee = collapse_employee_expenses(&snapshot.employee_expenses, &normalizer)
            .into_iter()
            .filter(|aggregate| keep(aggregate.category_matched.as_deref()))
            .map(DisplayEntry::EmployeeAggregate);

        let mut entries: Vec<DisplayEntry> = regular.chain(employee).collect();
        entries.sort_by(display_order);
        entries
    }
}

/// Newest first; on the same day regular entries precede employee
/// aggregates, then ids ascend.
fn display_order(a: &DisplayEntry, b: &DisplayEntry) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| a.is_employee().cmp(&b.is_employee()))
        .then_with(|| a.sort_id().cmp(&b.sort_id()))
}
