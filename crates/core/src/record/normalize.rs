//! Record normalizer.
//!
//! Validates raw records and coerces them into one canonical shape: a
//! calendar day, a fiscal month, a non-negative decimal amount and the
//! matched category.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::Value;

use expensebook_shared::types::Month;

use super::error::RecordError;
use super::types::{EmployeeExpense, Expense};
use crate::category::{CategoryList, is_sentinel};

/// A record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Calendar day in the configured time zone.
    pub date: NaiveDate,
    /// Booked month, or the month of `date` when none was booked.
    pub month: Month,
    /// Amount; zero when the raw value could not be coerced.
    pub amount: Decimal,
    /// Category as written on the record, trimmed.
    pub category: String,
    /// Canonical category from the known list, if any matched.
    pub category_matched: Option<String>,
}

impl NormalizedRecord {
    /// Day key in `YYYY-MM-DD` form.
    #[must_use]
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The matched category if it accumulates amounts (i.e. is not a sentinel).
    #[must_use]
    pub fn accumulating_category(&self) -> Option<&str> {
        self.category_matched
            .as_deref()
            .filter(|category| !is_sentinel(category))
    }
}

/// Normalizes raw records against a category list and time zone.
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer<'a> {
    categories: &'a CategoryList,
    tz: Tz,
}

impl<'a> RecordNormalizer<'a> {
    /// Creates a normalizer.
    #[must_use]
    pub const fn new(categories: &'a CategoryList, tz: Tz) -> Self {
        Self { categories, tz }
    }

    /// The category list records are matched against.
    #[must_use]
    pub const fn categories(&self) -> &'a CategoryList {
        self.categories
    }

    /// Normalizes a regular expense.
    pub fn expense(&self, expense: &Expense) -> Result<NormalizedRecord, RecordError> {
        self.normalize(
            expense.date.as_deref(),
            expense.amount.as_ref(),
            expense.category.as_deref(),
            expense.month.as_deref(),
        )
    }

    /// Normalizes an employee expense. Its month always follows its date.
    pub fn employee_expense(
        &self,
        expense: &EmployeeExpense,
    ) -> Result<NormalizedRecord, RecordError> {
        self.normalize(
            expense.date.as_deref(),
            expense.amount.as_ref(),
            expense.category.as_deref(),
            None,
        )
    }

    fn normalize(
        &self,
        date: Option<&str>,
        amount: Option<&Value>,
        category: Option<&str>,
        month: Option<&str>,
    ) -> Result<NormalizedRecord, RecordError> {
        let date = non_blank(date).ok_or(RecordError::Incomplete { field: "date" })?;
        let amount = amount.ok_or(RecordError::Incomplete { field: "amount" })?;
        let category = non_blank(category).ok_or(RecordError::Incomplete { field: "category" })?;

        let date =
            parse_date(date, self.tz).ok_or_else(|| RecordError::InvalidDate(date.to_string()))?;
        let month = month
            .and_then(|m| Month::from_str(m).ok())
            .unwrap_or_else(|| Month::of(date));

        Ok(NormalizedRecord {
            date,
            month,
            amount: coerce_amount(amount),
            category: category.to_string(),
            category_matched: self.categories.lookup(category).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a record date into a calendar day.
///
/// RFC 3339 timestamps are shifted into `tz` first; naive date-times and
/// plain `YYYY-MM-DD` dates are taken as they are.
#[must_use]
pub fn parse_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&tz).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Coerces a raw amount into a non-negative decimal.
///
/// Numbers and numeric strings are converted; anything else, including
/// negative values, contributes zero.
#[must_use]
pub fn coerce_amount(raw: &Value) -> Decimal {
    let parsed = match raw {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    };
    match parsed {
        Some(amount) if amount >= Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn categories() -> CategoryList {
        CategoryList::new(["Petrol", "Bank", "Total"])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_matches_category_case_insensitively() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        let record = normalizer
            .expense(&Expense::new("2024-04-01", dec!(50), "petrol"))
            .unwrap();

        assert_eq!(record.day_key(), "2024-04-01");
        assert_eq!(record.month, Month::April);
        assert_eq!(record.amount, dec!(50));
        assert_eq!(record.category, "petrol");
        assert_eq!(record.category_matched.as_deref(), Some("Petrol"));
        assert_eq!(record.accumulating_category(), Some("Petrol"));
    }

    #[test]
    fn test_unmatched_and_sentinel_categories() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);

        let unmatched = normalizer
            .expense(&Expense::new("2024-04-01", dec!(5), "Salary"))
            .unwrap();
        assert_eq!(unmatched.category_matched, None);

        let sentinel = normalizer
            .expense(&Expense::new("2024-04-01", dec!(5), "total"))
            .unwrap();
        assert_eq!(sentinel.category_matched.as_deref(), Some("Total"));
        assert_eq!(sentinel.accumulating_category(), None);
    }

    #[rstest]
    #[case(Expense { amount: Some(json!(10)), category: Some("Bank".into()), ..Expense::default() }, "date")]
    #[case(Expense { date: Some("  ".into()), amount: Some(json!(10)), category: Some("Bank".into()), ..Expense::default() }, "date")]
    #[case(Expense { date: Some("2024-04-01".into()), category: Some("Bank".into()), ..Expense::default() }, "amount")]
    #[case(Expense { date: Some("2024-04-01".into()), amount: Some(json!(10)), ..Expense::default() }, "category")]
    fn test_incomplete_records_rejected(#[case] expense: Expense, #[case] field: &'static str) {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        assert_eq!(
            normalizer.expense(&expense),
            Err(RecordError::Incomplete { field })
        );
    }

    #[test]
    fn test_null_date_from_json_is_rejected() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        let expense: Expense =
            serde_json::from_str(r#"{"date": null, "amount": 10, "category": "Bank"}"#).unwrap();
        assert_eq!(
            normalizer.expense(&expense),
            Err(RecordError::Incomplete { field: "date" })
        );
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        assert_eq!(
            normalizer.expense(&Expense::new("01/04/2024", dec!(1), "Bank")),
            Err(RecordError::InvalidDate("01/04/2024".to_string()))
        );
    }

    #[rstest]
    #[case("2024-04-01", Tz::UTC, date(2024, 4, 1))]
    #[case("2024-04-01T10:15:00", Tz::UTC, date(2024, 4, 1))]
    #[case("2024-04-01 10:15:00.250", Tz::UTC, date(2024, 4, 1))]
    #[case("2024-03-31T18:30:00.000Z", Tz::UTC, date(2024, 3, 31))]
    #[case("2024-03-31T18:30:00.000Z", chrono_tz::Asia::Kolkata, date(2024, 4, 1))]
    #[case("2024-04-01T02:00:00+05:30", chrono_tz::America::New_York, date(2024, 3, 31))]
    fn test_parse_date(#[case] raw: &str, #[case] tz: Tz, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(raw, tz), Some(expected));
    }

    #[rstest]
    #[case(json!(100), dec!(100))]
    #[case(json!(12.5), dec!(12.5))]
    #[case(json!("42.10"), dec!(42.10))]
    #[case(json!(" 7 "), dec!(7))]
    #[case(json!(1e3), dec!(1000))]
    #[case(json!("abc"), Decimal::ZERO)]
    #[case(json!(true), Decimal::ZERO)]
    #[case(json!({"value": 3}), Decimal::ZERO)]
    #[case(json!(-5), Decimal::ZERO)]
    fn test_coerce_amount(#[case] raw: Value, #[case] expected: Decimal) {
        assert_eq!(coerce_amount(&raw), expected);
    }

    #[test]
    fn test_booked_month_wins_over_date() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        let record = normalizer
            .expense(&Expense::new("2024-04-30", dec!(1), "Bank").with_month("may"))
            .unwrap();
        assert_eq!(record.month, Month::May);

        let fallback = normalizer
            .expense(&Expense::new("2024-04-30", dec!(1), "Bank").with_month("???"))
            .unwrap();
        assert_eq!(fallback.month, Month::April);
    }

    #[test]
    fn test_employee_expense_month_follows_date() {
        let list = categories();
        let normalizer = RecordNormalizer::new(&list, Tz::UTC);
        let record = normalizer
            .employee_expense(&EmployeeExpense::new("A", "2025-01-15", dec!(30), "Bank"))
            .unwrap();
        assert_eq!(record.month, Month::January);
        assert_eq!(record.category_matched.as_deref(), Some("Bank"));
    }
}
