//! Aggregation service.

use std::collections::BTreeMap;

use tracing::debug;

use super::employee::collapse_employee_expenses;
use super::types::{AggregateRow, GroupBy, GroupKey, RecordFilter};
use crate::category::CategoryList;
use crate::record::{EmployeeExpense, Expense, NormalizedRecord, RecordNormalizer};

/// Service for grouping records and summing their amounts.
pub struct AggregationService;

impl AggregationService {
    /// Normalizes regular expenses and unions them with the collapsed
    /// employee aggregates.
    ///
    /// Malformed records are dropped here and never reach a sum.
    #[must_use]
    pub fn merge(
        expenses: &[Expense],
        employee_expenses: &[EmployeeExpense],
        normalizer: &RecordNormalizer<'_>,
    ) -> Vec<NormalizedRecord> {
        let regular = expenses
            .iter()
            .filter_map(|expense| match normalizer.expense(expense) {
                Ok(record) => Some(record),
                Err(error) => {
                    debug!(id = ?expense.id, %error, "skipping expense");
                    None
                }
            });

        let employee = collapse_employee_expenses(employee_expenses, normalizer)
            .into_iter()
            .map(|aggregate| aggregate.to_record());

        regular.chain(employee).collect()
    }

    /// Groups `records` by `group_by` and sums amounts per category.
    ///
    /// A row exists for the key of every record passing `filter`, with every
    /// accumulating category seeded to zero. Only records whose category
    /// matched a non-sentinel name add to a row. In `GroupBy::Month` the key
    /// is the filter month, or the record's own month without one.
    #[must_use]
    pub fn aggregate(
        records: &[NormalizedRecord],
        categories: &CategoryList,
        group_by: GroupBy,
        filter: &RecordFilter,
    ) -> BTreeMap<GroupKey, AggregateRow> {
        let mut rows = BTreeMap::new();

        for record in records.iter().filter(|record| filter.matches(record)) {
            let key = match group_by {
                GroupBy::Day => GroupKey::Day(record.date),
                GroupBy::Month => GroupKey::MonthTotal(filter.month.unwrap_or(record.month)),
                GroupBy::Category => match record.accumulating_category() {
                    Some(category) => GroupKey::Category(category.to_string()),
                    None => continue,
                },
            };

            let row = rows
                .entry(key)
                .or_insert_with(|| AggregateRow::seeded(categories));
            if let Some(category) = record.accumulating_category() {
                row.add(category, record.amount);
            }
        }

        rows
    }

    /// Merges both record kinds and aggregates them in one step.
    #[must_use]
    pub fn aggregate_all(
        expenses: &[Expense],
        employee_expenses: &[EmployeeExpense],
        normalizer: &RecordNormalizer<'_>,
        group_by: GroupBy,
        filter: &RecordFilter,
    ) -> BTreeMap<GroupKey, AggregateRow> {
        let records = Self::merge(expenses, employee_expenses, normalizer);
        Self::aggregate(&records, normalizer.categories(), group_by, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use expensebook_shared::types::Month;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> GroupKey {
        GroupKey::Day(NaiveDate::from_ymd_opt(2024, 4, d).unwrap())
    }

    fn petrol_bank() -> CategoryList {
        CategoryList::new(["Petrol", "Bank", "Total"])
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new("2024-04-01", dec!(100), "Petrol"),
            Expense::new("2024-04-01", dec!(50), "petrol"),
            Expense::new("2024-04-02", dec!(20), "Bank"),
        ]
    }

    #[test]
    fn test_group_by_day() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);

        let rows = AggregationService::aggregate_all(
            &sample_expenses(),
            &[],
            &normalizer,
            GroupBy::Day,
            &RecordFilter::all(),
        );

        assert_eq!(rows.len(), 2);
        let first = &rows[&day(1)];
        assert_eq!(first.amount("Petrol"), dec!(150));
        assert_eq!(first.amount("Bank"), Decimal::ZERO);
        assert_eq!(first.total, dec!(150));
        let second = &rows[&day(2)];
        assert_eq!(second.amount("Petrol"), Decimal::ZERO);
        assert_eq!(second.amount("Bank"), dec!(20));
        assert_eq!(second.total, dec!(20));
        assert!(!first.amounts.contains_key("Total"));
    }

    #[test]
    fn test_group_by_month_uses_filter_label() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let mut expenses = sample_expenses();
        expenses.push(Expense::new("2024-05-03", dec!(999), "Bank"));

        let rows = AggregationService::aggregate_all(
            &expenses,
            &[],
            &normalizer,
            GroupBy::Month,
            &RecordFilter::month(Month::April),
        );

        assert_eq!(rows.len(), 1);
        let (key, row) = rows.iter().next().unwrap();
        assert_eq!(key.to_string(), "April Total");
        assert_eq!(row.total, dec!(170));
    }

    #[test]
    fn test_group_by_month_without_filter_splits_months() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let mut expenses = sample_expenses();
        expenses.push(Expense::new("2024-05-03", dec!(5), "Bank"));

        let rows = AggregationService::aggregate_all(
            &expenses,
            &[],
            &normalizer,
            GroupBy::Month,
            &RecordFilter::all(),
        );

        let labels: Vec<String> = rows.keys().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["April Total", "May Total"]);
    }

    #[test]
    fn test_group_by_category() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let mut expenses = sample_expenses();
        expenses.push(Expense::new("2024-04-02", dec!(7), "Salary"));

        let rows = AggregationService::aggregate_all(
            &expenses,
            &[],
            &normalizer,
            GroupBy::Category,
            &RecordFilter::all(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[&GroupKey::Category("Petrol".into())].total, dec!(150));
        assert_eq!(rows[&GroupKey::Category("Bank".into())].total, dec!(20));
    }

    #[test]
    fn test_employee_expenses_merge_with_regular() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let employee = vec![
            EmployeeExpense::new("A", "2024-04-02", dec!(30), "Bank"),
            EmployeeExpense::new("B", "2024-04-02", dec!(40), "bank"),
        ];

        let rows = AggregationService::aggregate_all(
            &sample_expenses(),
            &employee,
            &normalizer,
            GroupBy::Day,
            &RecordFilter::all(),
        );

        assert_eq!(rows[&day(2)].amount("Bank"), dec!(90));
        assert_eq!(rows[&day(2)].total, dec!(90));
    }

    #[test]
    fn test_day_filter() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let filter = RecordFilter::day(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());

        let rows = AggregationService::aggregate_all(
            &sample_expenses(),
            &[],
            &normalizer,
            GroupBy::Day,
            &filter,
        );

        assert_eq!(rows.keys().collect::<Vec<_>>(), vec![&day(2)]);
    }

    #[test]
    fn test_unmatched_record_seeds_a_zero_row() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let expenses = vec![Expense::new("2024-04-05", dec!(80), "Salary")];

        let rows = AggregationService::aggregate_all(
            &expenses,
            &[],
            &normalizer,
            GroupBy::Day,
            &RecordFilter::all(),
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[&day(5)].total, Decimal::ZERO);
    }

    #[test]
    fn test_only_sentinel_categories_gives_zero_totals() {
        let categories = CategoryList::new(["Total", "Indirect Exp"]);
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let expenses = vec![
            Expense::new("2024-04-01", dec!(10), "Total"),
            Expense::new("2024-04-02", dec!(10), "Indirect Exp"),
        ];

        let rows = AggregationService::aggregate_all(
            &expenses,
            &[],
            &normalizer,
            GroupBy::Day,
            &RecordFilter::all(),
        );

        assert!(rows.values().all(|row| row.total.is_zero() && row.amounts.is_empty()));
    }

    #[test]
    fn test_empty_input_gives_empty_mapping() {
        let categories = petrol_bank();
        let rows = AggregationService::aggregate(
            &[],
            &categories,
            GroupBy::Day,
            &RecordFilter::all(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_month_filter_matching_nothing_gives_empty_mapping() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);

        let rows = AggregationService::aggregate_all(
            &sample_expenses(),
            &[],
            &normalizer,
            GroupBy::Day,
            &RecordFilter::month(Month::June),
        );

        assert!(rows.is_empty());
    }

    #[test]
    fn test_malformed_record_dropped() {
        let categories = petrol_bank();
        let normalizer = RecordNormalizer::new(&categories, Tz::UTC);
        let malformed: Expense =
            serde_json::from_str(r#"{"date": null, "amount": 10, "category": "Bank"}"#).unwrap();

        let rows = AggregationService::aggregate_all(
            &[malformed],
            &[],
            &normalizer,
            GroupBy::Day,
            &RecordFilter::all(),
        );

        assert!(rows.is_empty());
    }
}
