//! Branch routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the branch routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/branches", get(list_branches))
}

/// GET /branches - Branch names.
async fn list_branches(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.source.list_branches().await?))
}
