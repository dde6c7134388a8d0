//! Helpers for route tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono_tz::Tz;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use expensebook_core::record::{EmployeeExpense, Expense};
use expensebook_core::source::InMemorySource;

use crate::{AppState, create_router};

/// An in-memory source seeded with a small April/May data set.
pub fn seeded_source() -> InMemorySource {
    InMemorySource::new()
        .with_categories(["Petrol", "Bank", "Total", "Indirect Exp"])
        .with_expenses(vec![
            Expense::new("2024-04-01", dec!(100), "Petrol").with_id("x1"),
            Expense::new("2024-04-01", dec!(50), "petrol").with_id("x2"),
            Expense::new("2024-04-02", dec!(20), "Bank")
                .with_id("x3")
                .with_description("fees"),
            Expense::new("2024-05-10", dec!(5), "Bank").with_id("x4"),
            Expense::new("2024-04-03", dec!(9), "Salary").with_id("x5"),
        ])
        .with_employee_expenses(vec![
            EmployeeExpense::new("A", "2024-04-02", dec!(30), "Bank").with_id("e1"),
            EmployeeExpense::new("B", "2024-04-02", dec!(40), "Bank").with_id("e2"),
        ])
        .with_branches(["Main", "North"])
}

/// The full application router over `source`.
pub fn app(source: InMemorySource) -> Router {
    create_router(AppState::new(Arc::new(source), Tz::UTC))
}

/// Sends one request and returns the status and the JSON body (`Null` when empty).
pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
