//! Entry routes and entry response types.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use expensebook_core::aggregate::{CustomerEntry, EmployeeAggregate};
use expensebook_core::source::load_all;
use expensebook_core::view::{DisplayEntry, ExpenseEntry, ReportService};
use expensebook_shared::types::format_amount;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the entry routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/entries/unmatched", get(list_unmatched))
}

// ============================================================================
// Response Types
// ============================================================================

/// One entry of an entry list.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryResponse {
    /// A regular expense.
    Regular {
        /// Backend identifier.
        id: Option<String>,
        /// Day (`YYYY-MM-DD`).
        date: String,
        /// Booked month.
        month: String,
        /// Two-decimal amount.
        amount: String,
        /// Category as written on the record.
        category: String,
        /// Description.
        description: Option<String>,
    },
    /// Every employee expense of one day in one category.
    EmployeeAggregate {
        /// Day (`YYYY-MM-DD`).
        date: String,
        /// Category.
        category: String,
        /// Two-decimal sum.
        amount: String,
        /// Contributing entries.
        customers: Vec<CustomerResponse>,
    },
}

/// One contributing employee entry.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// Backend identifier.
    pub id: Option<String>,
    /// Employee name.
    pub name: String,
    /// Two-decimal amount.
    pub amount: String,
    /// Description.
    pub description: Option<String>,
}

impl From<&DisplayEntry> for EntryResponse {
    fn from(entry: &DisplayEntry) -> Self {
        match entry {
            DisplayEntry::Regular(entry) => regular_response(entry),
            DisplayEntry::EmployeeAggregate(aggregate) => aggregate_response(aggregate),
        }
    }
}

fn regular_response(entry: &ExpenseEntry) -> EntryResponse {
    EntryResponse::Regular {
        id: entry.id.as_ref().map(ToString::to_string),
        date: entry.date.format("%Y-%m-%d").to_string(),
        month: entry.month.name().to_string(),
        amount: format_amount(entry.amount),
        category: entry.category.clone(),
        description: entry.description.clone(),
    }
}

fn aggregate_response(aggregate: &EmployeeAggregate) -> EntryResponse {
    EntryResponse::EmployeeAggregate {
        date: aggregate.date.format("%Y-%m-%d").to_string(),
        category: aggregate
            .category_matched
            .clone()
            .unwrap_or_else(|| aggregate.category.clone()),
        amount: format_amount(aggregate.amount),
        customers: aggregate.customers.iter().map(customer_response).collect(),
    }
}

fn customer_response(customer: &CustomerEntry) -> CustomerResponse {
    CustomerResponse {
        id: customer.id.as_ref().map(ToString::to_string),
        name: customer.name.clone(),
        amount: format_amount(customer.amount),
        description: customer.description.clone(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /entries/unmatched - Entries whose category matches no known category.
async fn list_unmatched(State(state): State<AppState>) -> ApiResult<Json<Vec<EntryResponse>>> {
    let (ctx, snapshot) = load_all(state.source.as_ref(), state.timezone).await?;
    let entries = ReportService::unmatched_entries(&ctx, &snapshot);
    Ok(Json(entries.iter().map(EntryResponse::from).collect()))
}
