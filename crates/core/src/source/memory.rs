//! In-memory expense source.
//!
//! Holds every list behind a `tokio::sync::RwLock`. Used by tests and for
//! running the API without a backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ExpenseSource;
use super::error::SourceError;
use crate::category::CategoryList;
use crate::record::{EmployeeExpense, Expense};

#[derive(Debug, Default)]
struct State {
    expenses: Vec<Expense>,
    employee_expenses: Vec<EmployeeExpense>,
    categories: CategoryList,
    branches: Vec<String>,
}

/// An [`ExpenseSource`] over in-memory lists.
#[derive(Debug, Default)]
pub struct InMemorySource {
    state: RwLock<State>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the regular expenses.
    #[must_use]
    pub fn with_expenses(self, expenses: Vec<Expense>) -> Self {
        let mut state = self.state.into_inner();
        state.expenses = expenses;
        Self::from_state(state)
    }

    /// Seeds the employee expenses.
    #[must_use]
    pub fn with_employee_expenses(self, employee_expenses: Vec<EmployeeExpense>) -> Self {
        let mut state = self.state.into_inner();
        state.employee_expenses = employee_expenses;
        Self::from_state(state)
    }

    /// Seeds the category list.
    #[must_use]
    pub fn with_categories<I, S>(self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.into_inner();
        state.categories = CategoryList::new(categories);
        Self::from_state(state)
    }

    /// Seeds the branch names.
    #[must_use]
    pub fn with_branches<I, S>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.into_inner();
        state.branches = branches.into_iter().map(Into::into).collect();
        Self::from_state(state)
    }

    /// Appends a regular expense.
    pub async fn push_expense(&self, expense: Expense) {
        self.state.write().await.expenses.push(expense);
    }

    fn from_state(state: State) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl ExpenseSource for InMemorySource {
    async fn list_expenses(&self) -> Result<Vec<Expense>, SourceError> {
        Ok(self.state.read().await.expenses.clone())
    }

    async fn list_employee_expenses(&self) -> Result<Vec<EmployeeExpense>, SourceError> {
        Ok(self.state.read().await.employee_expenses.clone())
    }

    async fn list_categories(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.state.read().await.categories.names().to_vec())
    }

    async fn add_category(&self, name: &str) -> Result<(), SourceError> {
        self.state.write().await.categories.add(name)?;
        Ok(())
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<(), SourceError> {
        self.state.write().await.categories.rename(old, new)?;
        Ok(())
    }

    async fn remove_category(&self, name: &str) -> Result<(), SourceError> {
        self.state.write().await.categories.remove(name)?;
        Ok(())
    }

    async fn list_branches(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.state.read().await.branches.clone())
    }
}
