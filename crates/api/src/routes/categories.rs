//! Category routes.
//!
//! Mutations go to the expense source; totals computed earlier are never
//! affected.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use expensebook_core::source::load_all;
use expensebook_core::view::ReportService;
use expensebook_shared::types::format_amount;

use super::entries::EntryResponse;
use crate::AppState;
use crate::error::ApiResult;

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(add_category))
        .route(
            "/categories/{name}",
            put(rename_category).delete(remove_category),
        )
        .route("/categories/{name}/entries", get(get_category_entries))
}

/// Request body naming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryNameRequest {
    /// Category name.
    pub name: String,
}

/// Response for a category entry list.
#[derive(Debug, Serialize)]
pub struct CategoryEntriesResponse {
    /// Canonical category name.
    pub category: String,
    /// Entries, newest first.
    pub entries: Vec<EntryResponse>,
    /// Number of regular entries.
    pub regular_count: usize,
    /// Two-decimal sum of regular entries.
    pub regular_total: String,
    /// Number of employee aggregate rows.
    pub employee_count: usize,
    /// Two-decimal sum of employee rows.
    pub employee_total: String,
    /// Two-decimal sum of all entries.
    pub grand_total: String,
}

/// GET /categories - Category names in display order.
async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.source.list_categories().await?))
}

/// POST /categories - Appends a category.
async fn add_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryNameRequest>,
) -> ApiResult<(StatusCode, Json<Vec<String>>)> {
    state.source.add_category(&request.name).await?;
    info!(category = %request.name, "category added");
    Ok((StatusCode::CREATED, Json(state.source.list_categories().await?)))
}

/// PUT /categories/{name} - Renames a category in place.
async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<CategoryNameRequest>,
) -> ApiResult<Json<Vec<String>>> {
    state.source.rename_category(&name, &request.name).await?;
    info!(from = %name, to = %request.name, "category renamed");
    Ok(Json(state.source.list_categories().await?))
}

/// DELETE /categories/{name} - Removes a category.
async fn remove_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.source.remove_category(&name).await?;
    info!(category = %name, "category removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories/{name}/entries - Regular and employee entries of a category.
async fn get_category_entries(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CategoryEntriesResponse>> {
    let (ctx, snapshot) = load_all(state.source.as_ref(), state.timezone).await?;
    let entries = ReportService::compute_category_entries(&ctx, &snapshot, &name)?;

    Ok(Json(CategoryEntriesResponse {
        category: entries.category,
        entries: entries.entries.iter().map(EntryResponse::from).collect(),
        regular_count: entries.regular_count,
        regular_total: format_amount(entries.regular_total),
        employee_count: entries.employee_count,
        employee_total: format_amount(entries.employee_total),
        grand_total: format_amount(entries.grand_total),
    }))
}
