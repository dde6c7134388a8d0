//! Report routes.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use expensebook_core::report::{CategoryFilter, FormattedTotals};
use expensebook_core::source::{load_all, load_context};
use expensebook_core::view::{ReportService, ViewMode, ViewRequest};
use expensebook_shared::AppError;
use expensebook_shared::types::{Month, format_amount};

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/totals", get(get_totals))
        .route("/reports/daily", get(get_daily_totals))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the totals table.
#[derive(Debug, Default, Deserialize)]
pub struct TotalsQuery {
    /// `single_date`, `entire_month` or `all_days_of_month` (default).
    pub mode: Option<String>,
    /// Month name, full or three-letter.
    pub month: Option<String>,
    /// Day (`YYYY-MM-DD`) for the single date view.
    pub date: Option<String>,
    /// Category to show; all categories when absent or `Total`.
    pub category: Option<String>,
}

/// Query parameters for daily totals.
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// Month name, full or three-letter.
    pub month: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the totals table.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Mode the table was computed for.
    pub mode: &'static str,
    /// Selected month.
    pub month: Option<String>,
    /// Selected date.
    pub date: Option<String>,
    /// Rendered table.
    #[serde(flatten)]
    pub table: FormattedTotals,
}

/// One day of the daily totals.
#[derive(Debug, Serialize)]
pub struct DailyTotalResponse {
    /// Day (`YYYY-MM-DD`).
    pub day: String,
    /// Two-decimal amount per category.
    pub per_category: BTreeMap<String, String>,
    /// Two-decimal day total.
    pub total: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /reports/totals - Category totals for the selected view.
async fn get_totals(
    State(state): State<AppState>,
    Query(query): Query<TotalsQuery>,
) -> ApiResult<Json<TotalsResponse>> {
    let request = ViewRequest {
        mode: query
            .mode
            .as_deref()
            .map(ViewMode::from_str)
            .transpose()?
            .unwrap_or_default(),
        month: parse_month(query.month.as_deref())?,
        date: parse_date(query.date.as_deref())?,
        category: CategoryFilter::from_selection(query.category.as_deref()),
    };

    let (ctx, snapshot) = load_all(state.source.as_ref(), state.timezone).await?;
    let table = ReportService::compute_category_totals(&ctx, &snapshot, &request)?;

    Ok(Json(TotalsResponse {
        mode: request.mode.as_str(),
        month: request.month.map(|month| month.name().to_string()),
        date: request.date.map(|date| date.format("%Y-%m-%d").to_string()),
        table: table.render(),
    }))
}

/// GET /reports/daily - Per-day totals of regular expenses in a month.
async fn get_daily_totals(
    State(state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> ApiResult<Json<Vec<DailyTotalResponse>>> {
    let month = parse_month(query.month.as_deref())?
        .ok_or_else(|| AppError::MissingInput("month".to_string()))?;

    let source = state.source.as_ref();
    let (ctx, expenses) = tokio::try_join!(
        load_context(source, state.timezone),
        source.list_expenses()
    )?;

    let totals = ReportService::compute_daily_totals(&ctx, month, &expenses)
        .into_iter()
        .map(|daily| DailyTotalResponse {
            day: daily.day.format("%Y-%m-%d").to_string(),
            per_category: daily
                .per_category
                .into_iter()
                .map(|(category, amount)| (category, format_amount(amount)))
                .collect(),
            total: format_amount(daily.total),
        })
        .collect();

    Ok(Json(totals))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses an optional month name; blank means none.
fn parse_month(raw: Option<&str>) -> Result<Option<Month>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Month::from_str(raw)
            .map(Some)
            .map_err(|e| AppError::Validation(e.to_string()).into()),
    }
}

/// Parses an optional `YYYY-MM-DD` date; blank means none.
fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid date: {raw}")).into()),
    }
}
