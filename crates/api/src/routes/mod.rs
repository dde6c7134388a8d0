//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod branches;
pub mod categories;
pub mod entries;
pub mod health;
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(categories::routes())
        .merge(entries::routes())
        .merge(branches::routes())
}
