//! Read-through cache over an expense source.
//!
//! List results are kept in a moka cache for a configurable time-to-live.
//! Category mutations go straight to the inner source and drop the cached
//! category list.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use expensebook_core::record::{EmployeeExpense, Expense};
use expensebook_core::source::{ExpenseSource, SourceError};
use expensebook_shared::config::ReportConfig;

/// Default cache capacity (number of list results).
const DEFAULT_CACHE_CAPACITY: u64 = 16;

/// Default time-to-live for cached lists (30 seconds).
const DEFAULT_TTL_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ListKey {
    Expenses,
    EmployeeExpenses,
    Categories,
    Branches,
}

#[derive(Debug, Clone)]
enum CachedList {
    Expenses(Arc<Vec<Expense>>),
    EmployeeExpenses(Arc<Vec<EmployeeExpense>>),
    Names(Arc<Vec<String>>),
}

/// An [`ExpenseSource`] that caches the lists of an inner source.
pub struct CachedSource<S> {
    inner: S,
    cache: Cache<ListKey, CachedList>,
}

impl<S: ExpenseSource> CachedSource<S> {
    /// Wraps `inner` with default settings.
    ///
    /// Default: 16 entries max, 30 second TTL.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Wraps `inner` with a custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(inner: S, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Wraps `inner` using the report configuration's cache settings.
    #[must_use]
    pub fn from_config(inner: S, config: &ReportConfig) -> Self {
        Self::with_config(inner, config.cache_capacity, config.cache_ttl_secs)
    }

    /// The wrapped source.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached list.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn cached(&self, key: ListKey) -> Option<CachedList> {
        let hit = self.cache.get(&key).await;
        if hit.is_some() {
            debug!(?key, "cache hit");
        }
        hit
    }

    async fn names(&self, key: ListKey) -> Result<Vec<String>, SourceError> {
        if let Some(CachedList::Names(names)) = self.cached(key).await {
            return Ok(names.as_ref().clone());
        }

        let names = match key {
            ListKey::Branches => self.inner.list_branches().await?,
            _ => self.inner.list_categories().await?,
        };
        self.cache
            .insert(key, CachedList::Names(Arc::new(names.clone())))
            .await;
        Ok(names)
    }
}

#[async_trait]
impl<S: ExpenseSource> ExpenseSource for CachedSource<S> {
    async fn list_expenses(&self) -> Result<Vec<Expense>, SourceError> {
        if let Some(CachedList::Expenses(expenses)) = self.cached(ListKey::Expenses).await {
            return Ok(expenses.as_ref().clone());
        }

        let expenses = self.inner.list_expenses().await?;
        self.cache
            .insert(
                ListKey::Expenses,
                CachedList::Expenses(Arc::new(expenses.clone())),
            )
            .await;
        Ok(expenses)
    }

    async fn list_employee_expenses(&self) -> Result<Vec<EmployeeExpense>, SourceError> {
        if let Some(CachedList::EmployeeExpenses(records)) =
            self.cached(ListKey::EmployeeExpenses).await
        {
            return Ok(records.as_ref().clone());
        }

        let records = self.inner.list_employee_expenses().await?;
        self.cache
            .insert(
                ListKey::EmployeeExpenses,
                CachedList::EmployeeExpenses(Arc::new(records.clone())),
            )
            .await;
        Ok(records)
    }

    async fn list_categories(&self) -> Result<Vec<String>, SourceError> {
        self.names(ListKey::Categories).await
    }

    async fn add_category(&self, name: &str) -> Result<(), SourceError> {
        let result = self.inner.add_category(name).await;
        self.cache.invalidate(&ListKey::Categories).await;
        result
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<(), SourceError> {
        let result = self.inner.rename_category(old, new).await;
        self.cache.invalidate(&ListKey::Categories).await;
        result
    }

    async fn remove_category(&self, name: &str) -> Result<(), SourceError> {
        let result = self.inner.remove_category(name).await;
        self.cache.invalidate(&ListKey::Categories).await;
        result
    }

    async fn list_branches(&self) -> Result<Vec<String>, SourceError> {
        self.names(ListKey::Branches).await
    }
}
