//! Property-based tests for the report service.
//!
//! - Category totals are idempotent over a snapshot
//! - The grand total conserves the qualifying amounts
//! - Entry lists add up to their reported totals

use chrono_tz::Tz;
use proptest::prelude::*;
use rust_decimal::Decimal;

use expensebook_shared::types::Month;

use super::service::ReportService;
use super::types::{ReportContext, ViewRequest};
use crate::aggregate::{AggregationService, RecordFilter};
use crate::category::CategoryList;
use crate::record::{EmployeeExpense, Expense, RecordSnapshot};

const CATEGORY_POOL: [&str; 6] = ["Petrol", "BANK", "Rent", "Salary", "Total", "Indirect Exp"];

fn ctx() -> ReportContext {
    ReportContext::new(
        CategoryList::new(["Petrol", "Bank", "Rent", "Total", "Indirect Exp"]),
        Tz::UTC,
    )
}

/// Strategy to generate amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a day in April or May 2024.
fn date() -> impl Strategy<Value = String> {
    (4u32..=5, 1u32..=30).prop_map(|(month, day)| format!("2024-{month:02}-{day:02}"))
}

fn snapshot() -> impl Strategy<Value = RecordSnapshot> {
    let category = || prop::sample::select(CATEGORY_POOL.to_vec());
    let expenses = prop::collection::vec(
        (date(), amount(), category())
            .prop_map(|(date, amount, category)| Expense::new(&date, amount, category)),
        0..30,
    );
    let employee = prop::collection::vec(
        ("[A-Z][a-z]{2,6}", date(), amount(), category()).prop_map(
            |(name, date, amount, category)| EmployeeExpense::new(&name, &date, amount, category),
        ),
        0..15,
    );
    (expenses, employee).prop_map(|(expenses, employee)| RecordSnapshot::new(expenses, employee))
}

fn month() -> impl Strategy<Value = Month> {
    prop_oneof![Just(Month::April), Just(Month::May), Just(Month::June)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Computing the same view twice gives the same table.
    #[test]
    fn prop_category_totals_idempotent(snapshot in snapshot(), month in month()) {
        let ctx = ctx();
        let request = ViewRequest::all_days_of_month(month);

        let first = ReportService::compute_category_totals(&ctx, &snapshot, &request);
        let second = ReportService::compute_category_totals(&ctx, &snapshot, &request);

        prop_assert_eq!(first, second);
    }

    /// The grand total equals the sum of accumulating amounts in the month,
    /// in both month modes.
    #[test]
    fn prop_grand_total_conserved(snapshot in snapshot(), month in month()) {
        let ctx = ctx();
        let filter = RecordFilter::month(month);
        let expected: Decimal = AggregationService::merge(
            &snapshot.expenses,
            &snapshot.employee_expenses,
            &ctx.normalizer(),
        )
        .iter()
        .filter(|record| filter.matches(record) && record.accumulating_category().is_some())
        .map(|record| record.amount)
        .sum();

        let by_day = ReportService::compute_category_totals(
            &ctx,
            &snapshot,
            &ViewRequest::all_days_of_month(month),
        )
        .unwrap();
        let whole = ReportService::compute_category_totals(
            &ctx,
            &snapshot,
            &ViewRequest::entire_month(month),
        )
        .unwrap();

        prop_assert_eq!(by_day.grand_total, expected);
        prop_assert_eq!(whole.grand_total, expected);
        prop_assert_eq!(by_day.row_totals.iter().copied().sum::<Decimal>(), expected);
    }

    /// Entry list totals match the entries they list.
    #[test]
    fn prop_category_entries_totals(snapshot in snapshot()) {
        let entries = ReportService::compute_category_entries(&ctx(), &snapshot, "bank").unwrap();

        let sum: Decimal = entries.entries.iter().map(super::types::DisplayEntry::amount).sum();
        prop_assert_eq!(sum, entries.grand_total);
        prop_assert_eq!(
            entries.regular_count + entries.employee_count,
            entries.entries.len()
        );
        prop_assert!(entries.entries.windows(2).all(|pair| pair[0].date() >= pair[1].date()));
    }
}
