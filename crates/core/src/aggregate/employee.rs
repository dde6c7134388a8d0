//! Employee-expense collapse.
//!
//! Every employee expense sharing a (day, category) pair becomes one
//! synthetic `EmployeeAggregate`, so employee costs count exactly once per
//! day per category however many individual entries exist.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use super::types::{CustomerEntry, EmployeeAggregate};
use crate::record::{EmployeeExpense, RecordNormalizer};

/// Collapses employee expenses into per-(day, category) aggregates.
///
/// Aggregates keep the order in which their first record appeared.
/// Categories are compared case-insensitively. Malformed records are skipped.
#[must_use]
pub fn collapse_employee_expenses(
    records: &[EmployeeExpense],
    normalizer: &RecordNormalizer<'_>,
) -> Vec<EmployeeAggregate> {
    let mut positions: HashMap<(NaiveDate, String), usize> = HashMap::new();
    let mut aggregates: Vec<EmployeeAggregate> = Vec::new();

    for record in records {
        let normalized = match normalizer.employee_expense(record) {
            Ok(normalized) => normalized,
            Err(error) => {
                debug!(id = ?record.id, %error, "skipping employee expense");
                continue;
            }
        };

        let customer = CustomerEntry {
            id: record.id.clone(),
            name: record
                .customer_name
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            amount: normalized.amount,
            description: record.description.clone(),
        };

        let category_key = normalized
            .category_matched
            .as_deref()
            .unwrap_or(&normalized.category)
            .to_lowercase();

        match positions.get(&(normalized.date, category_key.clone())) {
            Some(&position) => {
                let aggregate = &mut aggregates[position];
                aggregate.amount += customer.amount;
                aggregate.customers.push(customer);
            }
            None => {
                positions.insert((normalized.date, category_key), aggregates.len());
                aggregates.push(EmployeeAggregate {
                    date: normalized.date,
                    month: normalized.month,
                    amount: customer.amount,
                    category: normalized.category,
                    category_matched: normalized.category_matched,
                    customers: vec![customer],
                });
            }
        }
    }

    aggregates
}
