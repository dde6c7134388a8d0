//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the report engine
//! - Error-to-response mapping
//! - Response types with two-decimal amounts

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono_tz::Tz;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use expensebook_core::source::ExpenseSource;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Expense backend.
    pub source: Arc<dyn ExpenseSource>,
    /// Time zone used to derive calendar days.
    pub timezone: Tz,
}

impl AppState {
    /// Creates the state.
    pub fn new(source: Arc<dyn ExpenseSource>, timezone: Tz) -> Self {
        Self { source, timezone }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
