//! Data-access collaborator.
//!
//! The engine never fetches data itself. An [`ExpenseSource`] hands over the
//! record lists and owns the mutable category list; callers load a snapshot
//! and a context from it and then run the pure report functions.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::debug;

use crate::category::CategoryList;
use crate::record::{EmployeeExpense, Expense, RecordSnapshot};
use crate::view::ReportContext;

pub use error::SourceError;
pub use memory::InMemorySource;

/// Access to the expense backend.
#[async_trait]
pub trait ExpenseSource: Send + Sync {
    /// Every regular expense.
    async fn list_expenses(&self) -> Result<Vec<Expense>, SourceError>;

    /// Every employee-attributed expense.
    async fn list_employee_expenses(&self) -> Result<Vec<EmployeeExpense>, SourceError>;

    /// Category names in display order.
    async fn list_categories(&self) -> Result<Vec<String>, SourceError>;

    /// Appends a category.
    async fn add_category(&self, name: &str) -> Result<(), SourceError>;

    /// Renames a category in place.
    async fn rename_category(&self, old: &str, new: &str) -> Result<(), SourceError>;

    /// Removes a category.
    async fn remove_category(&self, name: &str) -> Result<(), SourceError>;

    /// Branch names.
    async fn list_branches(&self) -> Result<Vec<String>, SourceError>;
}

/// Fetches both record lists concurrently.
pub async fn load_snapshot(source: &dyn ExpenseSource) -> Result<RecordSnapshot, SourceError> {
    let (expenses, employee_expenses) =
        tokio::try_join!(source.list_expenses(), source.list_employee_expenses())?;
    debug!(
        expenses = expenses.len(),
        employee_expenses = employee_expenses.len(),
        "loaded record snapshot"
    );
    Ok(RecordSnapshot::new(expenses, employee_expenses))
}

/// Fetches the category list and builds a report context for `timezone`.
pub async fn load_context(
    source: &dyn ExpenseSource,
    timezone: Tz,
) -> Result<ReportContext, SourceError> {
    let categories = source.list_categories().await?;
    Ok(ReportContext::new(CategoryList::new(categories), timezone))
}

/// Loads the context and the snapshot concurrently.
pub async fn load_all(
    source: &dyn ExpenseSource,
    timezone: Tz,
) -> Result<(ReportContext, RecordSnapshot), SourceError> {
    tokio::try_join!(load_context(source, timezone), load_snapshot(source))
}
