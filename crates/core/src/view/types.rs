//! View data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use expensebook_shared::types::{EmployeeExpenseId, ExpenseId, Month};

use super::error::ViewError;
use crate::aggregate::EmployeeAggregate;
use crate::category::CategoryList;
use crate::record::RecordNormalizer;
use crate::report::CategoryFilter;

/// How the totals view groups its columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One column for the selected date.
    SingleDate,
    /// One `"<Month> Total"` column.
    EntireMonth,
    /// One column per day of the selected month.
    #[default]
    AllDaysOfMonth,
}

impl ViewMode {
    /// The mode's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleDate => "single_date",
            Self::EntireMonth => "entire_month",
            Self::AllDaysOfMonth => "all_days_of_month",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_date" => Ok(Self::SingleDate),
            "entire_month" => Ok(Self::EntireMonth),
            "all_days_of_month" => Ok(Self::AllDaysOfMonth),
            other => Err(ViewError::UnknownMode(other.to_string())),
        }
    }
}

/// A fully specified totals request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ViewRequest {
    /// Grouping mode.
    pub mode: ViewMode,
    /// Selected month; required by the month modes.
    pub month: Option<Month>,
    /// Selected date; required by [`ViewMode::SingleDate`].
    pub date: Option<NaiveDate>,
    /// Displayed categories.
    pub category: CategoryFilter,
}

impl ViewRequest {
    /// Totals for one day.
    #[must_use]
    pub fn single_date(date: NaiveDate) -> Self {
        Self {
            mode: ViewMode::SingleDate,
            date: Some(date),
            ..Self::default()
        }
    }

    /// A single whole-month column.
    #[must_use]
    pub fn entire_month(month: Month) -> Self {
        Self {
            mode: ViewMode::EntireMonth,
            month: Some(month),
            ..Self::default()
        }
    }

    /// One column per day of `month`.
    #[must_use]
    pub fn all_days_of_month(month: Month) -> Self {
        Self {
            mode: ViewMode::AllDaysOfMonth,
            month: Some(month),
            ..Self::default()
        }
    }

    /// Restricts the displayed categories.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }
}

/// The user's current view selection.
///
/// The last selected mode persists until another one is chosen, while the
/// month, date and category can change independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    current: ViewRequest,
}

impl ViewSelection {
    /// Creates a selection in the default mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.current.mode
    }

    /// Switches the mode.
    pub fn select_mode(&mut self, mode: ViewMode) {
        self.current.mode = mode;
    }

    /// Selects a month.
    pub fn select_month(&mut self, month: Month) {
        self.current.month = Some(month);
    }

    /// Selects a date.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.current.date = Some(date);
    }

    /// Selects the displayed categories.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.current.category = category;
    }

    /// The request for the current selection.
    #[must_use]
    pub fn request(&self) -> ViewRequest {
        self.current.clone()
    }
}

/// Everything the core needs besides the records themselves.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Known categories in display order.
    pub categories: CategoryList,
    /// Time zone used to derive calendar days.
    pub timezone: Tz,
}

impl ReportContext {
    /// Creates a context.
    #[must_use]
    pub fn new(categories: CategoryList, timezone: Tz) -> Self {
        Self {
            categories,
            timezone,
        }
    }

    /// A normalizer over this context.
    #[must_use]
    pub fn normalizer(&self) -> RecordNormalizer<'_> {
        RecordNormalizer::new(&self.categories, self.timezone)
    }
}

/// A regular expense ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseEntry {
    /// Backend identifier.
    pub id: Option<ExpenseId>,
    /// Calendar day.
    pub date: NaiveDate,
    /// Booked month.
    pub month: Month,
    /// Amount.
    pub amount: Decimal,
    /// Category as written on the record.
    pub category: String,
    /// Description.
    pub description: Option<String>,
}

/// One line of an entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayEntry {
    /// A regular expense.
    Regular(ExpenseEntry),
    /// All employee expenses of one day in one category.
    EmployeeAggregate(EmployeeAggregate),
}

impl DisplayEntry {
    /// Calendar day of the entry.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Regular(entry) => entry.date,
            Self::EmployeeAggregate(aggregate) => aggregate.date,
        }
    }

    /// Amount of the entry.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Regular(entry) => entry.amount,
            Self::EmployeeAggregate(aggregate) => aggregate.amount,
        }
    }

    /// Returns true for employee aggregates.
    #[must_use]
    pub fn is_employee(&self) -> bool {
        matches!(self, Self::EmployeeAggregate(_))
    }

    /// Identifier used to order entries on the same day.
    ///
    /// Employee aggregates use the id of their first contributing record.
    #[must_use]
    pub fn sort_id(&self) -> Option<&str> {
        match self {
            Self::Regular(entry) => entry.id.as_ref().map(ExpenseId::as_str),
            Self::EmployeeAggregate(aggregate) => aggregate
                .customers
                .first()
                .and_then(|customer| customer.id.as_ref())
                .map(EmployeeExpenseId::as_str),
        }
    }
}

/// Entry list of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntries {
    /// Canonical category name.
    pub category: String,
    /// Entries, newest first.
    pub entries: Vec<DisplayEntry>,
    /// Number of regular entries.
    pub regular_count: usize,
    /// Sum of regular entries.
    pub regular_total: Decimal,
    /// Number of employee aggregate rows.
    pub employee_count: usize,
    /// Sum of employee aggregate rows.
    pub employee_total: Decimal,
    /// Sum of all entries.
    pub grand_total: Decimal,
}

/// Per-category amounts of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    /// The day.
    pub day: NaiveDate,
    /// Amount per non-sentinel category.
    pub per_category: BTreeMap<String, Decimal>,
    /// Sum of `per_category`.
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_keeps_mode_across_changes() {
        let mut selection = ViewSelection::new();
        assert_eq!(selection.mode(), ViewMode::AllDaysOfMonth);

        selection.select_mode(ViewMode::EntireMonth);
        selection.select_month(Month::May);
        selection.select_category(CategoryFilter::Only("Bank".into()));
        selection.select_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

        let request = selection.request();
        assert_eq!(request.mode, ViewMode::EntireMonth);
        assert_eq!(request.month, Some(Month::May));
        assert_eq!(request.category, CategoryFilter::Only("Bank".into()));
    }

    #[test]
    fn test_view_mode_from_str() {
        assert_eq!("Entire_Month".parse::<ViewMode>(), Ok(ViewMode::EntireMonth));
        assert_eq!(
            "weekly".parse::<ViewMode>(),
            Err(ViewError::UnknownMode("weekly".into()))
        );
    }

    #[test]
    fn test_view_mode_serde_names() {
        let mode: ViewMode = serde_json::from_str("\"single_date\"").unwrap();
        assert_eq!(mode, ViewMode::SingleDate);
        assert_eq!(
            serde_json::to_string(&ViewMode::AllDaysOfMonth).unwrap(),
            "\"all_days_of_month\""
        );
    }
}
