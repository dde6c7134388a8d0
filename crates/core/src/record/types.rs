//! Raw record types in the backend's JSON shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use expensebook_shared::types::{EmployeeExpenseId, ExpenseId};

use super::lenient;

/// A regular expense as returned by the backend.
///
/// Every field is optional and a field of the wrong JSON type reads as
/// missing, so one malformed record does not fail the whole list. The
/// normalizer decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Backend identifier.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ExpenseId>,
    /// ISO-8601 date or timestamp.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub date: Option<String>,
    /// Amount, normally a JSON number.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Category name as typed by the user.
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    /// Free-text description.
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    /// Month name the expense was booked under.
    #[serde(default, deserialize_with = "lenient::string")]
    pub month: Option<String>,
}

impl Expense {
    /// Creates a well-formed expense.
    #[must_use]
    pub fn new(date: &str, amount: Decimal, category: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            amount: Some(amount_value(amount)),
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    /// Sets the backend identifier.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(ExpenseId::new(id));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the booked month name.
    #[must_use]
    pub fn with_month(mut self, month: &str) -> Self {
        self.month = Some(month.to_string());
        self
    }
}

/// A cost attributed to a named employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeExpense {
    /// Backend identifier.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<EmployeeExpenseId>,
    /// Employee the cost is attributed to.
    #[serde(default, deserialize_with = "lenient::string")]
    pub customer_name: Option<String>,
    /// ISO-8601 date or timestamp.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub date: Option<String>,
    /// Amount, normally a JSON number.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Category name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
    /// Optional description.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl EmployeeExpense {
    /// Creates a well-formed employee expense.
    #[must_use]
    pub fn new(customer_name: &str, date: &str, amount: Decimal, category: &str) -> Self {
        Self {
            customer_name: Some(customer_name.to_string()),
            date: Some(date.to_string()),
            amount: Some(amount_value(amount)),
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    /// Sets the backend identifier.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(EmployeeExpenseId::new(id));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Encodes a decimal amount as a JSON number.
#[must_use]
pub fn amount_value(amount: Decimal) -> Value {
    amount
        .normalize()
        .to_string()
        .parse::<serde_json::Number>()
        .map_or(Value::Null, Value::Number)
}

/// Immutable view of the record arrays for one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Regular expenses, full history.
    pub expenses: Vec<Expense>,
    /// Employee-attributed expenses.
    pub employee_expenses: Vec<EmployeeExpense>,
}

impl RecordSnapshot {
    /// Creates a snapshot from both record arrays.
    #[must_use]
    pub fn new(expenses: Vec<Expense>, employee_expenses: Vec<EmployeeExpense>) -> Self {
        Self {
            expenses,
            employee_expenses,
        }
    }
}
