//! Aggregation data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use expensebook_shared::types::{EmployeeExpenseId, Month};

use crate::category::CategoryList;
use crate::record::NormalizedRecord;

/// Dimension records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One group per calendar day.
    Day,
    /// One `"<Month> Total"` group.
    Month,
    /// One group per matched category.
    Category,
}

/// Key of one aggregate row.
///
/// Day keys order chronologically, which matches the lexicographic order of
/// their `YYYY-MM-DD` labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// A calendar day.
    Day(NaiveDate),
    /// The whole-month total.
    MonthTotal(Month),
    /// A category name.
    Category(String),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::MonthTotal(month) => f.write_str(&month.total_label()),
            Self::Category(name) => f.write_str(name),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accumulated amounts for one group key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// Amount per category name.
    pub amounts: BTreeMap<String, Decimal>,
    /// Sum of all category amounts.
    pub total: Decimal,
}

impl AggregateRow {
    /// A row with every accumulating category set to zero.
    #[must_use]
    pub fn seeded(categories: &CategoryList) -> Self {
        Self {
            amounts: categories
                .accumulating()
                .map(|name| (name.to_string(), Decimal::ZERO))
                .collect(),
            total: Decimal::ZERO,
        }
    }

    /// Amount for `category`, zero when absent.
    #[must_use]
    pub fn amount(&self, category: &str) -> Decimal {
        self.amounts.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Adds `amount` to `category` and to the row total.
    pub fn add(&mut self, category: &str, amount: Decimal) {
        *self
            .amounts
            .entry(category.to_string())
            .or_insert(Decimal::ZERO) += amount;
        self.total += amount;
    }
}

/// Restricts which records take part in an aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only records booked in this month.
    pub month: Option<Month>,
    /// Only records on this day.
    pub day: Option<NaiveDate>,
}

impl RecordFilter {
    /// A filter that matches every record.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            month: None,
            day: None,
        }
    }

    /// Only records booked in `month`.
    #[must_use]
    pub const fn month(month: Month) -> Self {
        Self {
            month: Some(month),
            day: None,
        }
    }

    /// Only records on `day`.
    #[must_use]
    pub const fn day(day: NaiveDate) -> Self {
        Self {
            month: None,
            day: Some(day),
        }
    }

    /// Returns true if `record` passes the filter.
    #[must_use]
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.month.is_none_or(|month| record.month == month)
            && self.day.is_none_or(|day| record.date == day)
    }
}

/// One employee's contribution to a daily aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerEntry {
    /// Backend identifier of the employee expense.
    pub id: Option<EmployeeExpenseId>,
    /// Employee name; empty when the record carried none.
    pub name: String,
    /// Amount of this entry.
    pub amount: Decimal,
    /// Description of this entry.
    pub description: Option<String>,
}

/// Synthetic row standing for every employee expense on one day in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeAggregate {
    /// The shared day.
    pub date: NaiveDate,
    /// Month of `date`.
    pub month: Month,
    /// Category as written on the first contributing record.
    pub category: String,
    /// Canonical category, if it matched the known list.
    pub category_matched: Option<String>,
    /// Sum of the contributing amounts.
    pub amount: Decimal,
    /// Contributing entries in input order.
    pub customers: Vec<CustomerEntry>,
}

impl EmployeeAggregate {
    /// The aggregate as a single normalized record.
    #[must_use]
    pub fn to_record(&self) -> NormalizedRecord {
        NormalizedRecord {
            date: self.date,
            month: self.month,
            amount: self.amount,
            category: self.category.clone(),
            category_matched: self.category_matched.clone(),
        }
    }
}
