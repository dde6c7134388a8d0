//! Property-based tests for aggregation.
//!
//! - Aggregation is idempotent
//! - Row totals conserve the accumulated amounts
//! - Sentinel categories never accumulate
//! - Same-day, same-category employee expenses collapse to one row

use chrono::NaiveDate;
use chrono_tz::Tz;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::employee::collapse_employee_expenses;
use super::service::AggregationService;
use super::types::{GroupBy, RecordFilter};
use crate::category::{CategoryList, is_sentinel};
use crate::record::{EmployeeExpense, Expense, RecordNormalizer};

const CATEGORY_POOL: [&str; 7] = ["Petrol", "bank", "BANK", "Salary", "Rent", "Total", "indirect exp"];

fn categories() -> CategoryList {
    CategoryList::new(["Petrol", "Bank", "Rent", "Total", "Indirect Exp"])
}

/// Strategy to generate amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a day in April or May 2024.
fn date() -> impl Strategy<Value = String> {
    (4u32..=5, 1u32..=30).prop_map(|(month, day)| format!("2024-{month:02}-{day:02}"))
}

fn expense() -> impl Strategy<Value = Expense> {
    (date(), amount(), prop::sample::select(CATEGORY_POOL.to_vec()))
        .prop_map(|(date, amount, category)| Expense::new(&date, amount, category))
}

fn employee_expense() -> impl Strategy<Value = EmployeeExpense> {
    (
        "[A-Z][a-z]{2,6}",
        date(),
        amount(),
        prop::sample::select(CATEGORY_POOL.to_vec()),
    )
        .prop_map(|(name, date, amount, category)| {
            EmployeeExpense::new(&name, &date, amount, category)
        })
}

fn group_by() -> impl Strategy<Value = GroupBy> {
    prop_oneof![Just(GroupBy::Day), Just(GroupBy::Month), Just(GroupBy::Category)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Aggregating the same records twice gives identical rows.
    #[test]
    fn prop_aggregate_is_idempotent(
        expenses in prop::collection::vec(expense(), 0..40),
        employee in prop::collection::vec(employee_expense(), 0..20),
        group_by in group_by(),
    ) {
        let categories = categories();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let filter = RecordFilter::all();

        let first = AggregationService::aggregate_all(&expenses, &employee, &normalizer, group_by, &filter);
        let second = AggregationService::aggregate_all(&expenses, &employee, &normalizer, group_by, &filter);

        prop_assert_eq!(first, second);
    }

    /// The row totals add up to the amounts of all accumulating records.
    #[test]
    fn prop_totals_conserve_accumulated_amounts(
        expenses in prop::collection::vec(expense(), 0..40),
        employee in prop::collection::vec(employee_expense(), 0..20),
        group_by in group_by(),
    ) {
        let categories = categories();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let records = AggregationService::merge(&expenses, &employee, &normalizer);
        let expected: Decimal = records
            .iter()
            .filter(|record| record.accumulating_category().is_some())
            .map(|record| record.amount)
            .sum();

        let rows = AggregationService::aggregate(&records, &categories, group_by, &RecordFilter::all());

        let grand: Decimal = rows.values().map(|row| row.total).sum();
        prop_assert_eq!(grand, expected);
        for row in rows.values() {
            let cells: Decimal = row.amounts.values().copied().sum();
            prop_assert_eq!(cells, row.total);
        }
    }

    /// No row ever carries a sentinel category.
    #[test]
    fn prop_sentinels_never_accumulate(
        expenses in prop::collection::vec(expense(), 0..40),
        group_by in group_by(),
    ) {
        let categories = categories();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);

        let rows = AggregationService::aggregate_all(&expenses, &[], &normalizer, group_by, &RecordFilter::all());

        for (key, row) in &rows {
            prop_assert!(!is_sentinel(&key.to_string()) || group_by != GroupBy::Category);
            prop_assert!(row.amounts.keys().all(|name| !is_sentinel(name)));
        }
    }

    /// N employee expenses on one day in one category become one aggregate.
    #[test]
    fn prop_employee_expenses_collapse(
        amounts in prop::collection::vec(amount(), 1..25),
        day in 1u32..=30,
    ) {
        let categories = categories();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let date = format!("2024-04-{day:02}");
        let records: Vec<EmployeeExpense> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| EmployeeExpense::new(&format!("E{i}"), &date, *amount, "Rent"))
            .collect();

        let aggregates = collapse_employee_expenses(&records, &normalizer);

        prop_assert_eq!(aggregates.len(), 1);
        let aggregate = &aggregates[0];
        prop_assert_eq!(aggregate.amount, amounts.iter().copied().sum::<Decimal>());
        prop_assert_eq!(aggregate.customers.len(), amounts.len());
        prop_assert_eq!(aggregate.date, NaiveDate::from_ymd_opt(2024, 4, day).unwrap());
    }
}
