//! Payroll service HTTP server.
//!
//! Wires a storage backend into the JSON API and serves it under `/api/v1`,
//! with request tracing on every route.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use payroll_core::store::{EmployeeStore, PayrollStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `PAYROLL_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: EmployeeStore + PayrollStore + 'static,
{
  Router::new()
    .nest("/api/v1", payroll_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use payroll_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn test_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    app(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  /// POST an employee and return the response body.
  async fn create_employee(
    app:       &Router,
    code:      &str,
    name:      &str,
    base:      i64,
    allowance: i64,
  ) -> Value {
    let (status, body) = send(
      app,
      "POST",
      "/api/v1/employees",
      Some(json!({
        "code": code,
        "full_name": name,
        "email": format!("{code}@example.com"),
        "base_salary": base,
        "allowance": allowance,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
  }

  async fn deactivate(app: &Router, employee: &Value) {
    let id = employee["id"].as_str().unwrap();
    let (status, _) = send(
      app,
      "PUT",
      &format!("/api/v1/employees/{id}"),
      Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  async fn generate(app: &Router, period_code: &str) -> (StatusCode, Value) {
    send(
      app,
      "POST",
      "/api/v1/payroll/generate",
      Some(json!({ "period_code": period_code })),
    )
    .await
  }

  // ── Employees ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_and_fetch_employee() {
    let app = test_app().await;
    let created = create_employee(&app, "EMP-001", "Alice Liddell", 1000, 100).await;

    assert_eq!(created["code"], "EMP-001");
    assert_eq!(created["is_active"], json!(true));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) =
      send(&app, "GET", &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["full_name"], "Alice Liddell");
    assert_eq!(fetched["base_salary"], json!(1000));
    assert_eq!(fetched["allowance"], json!(100));
  }

  #[tokio::test]
  async fn create_employee_with_bad_email_is_rejected() {
    let app = test_app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/v1/employees",
      Some(json!({
        "code": "EMP-001",
        "full_name": "Alice",
        "email": "not-an-address",
        "base_salary": 1000,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn get_unknown_employee_returns_404() {
    let app = test_app().await;
    let (status, _) = send(
      &app,
      "GET",
      &format!("/api/v1/employees/{}", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_employee_applies_partial_body() {
    let app = test_app().await;
    let created = create_employee(&app, "EMP-001", "Alice", 1000, 100).await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
      &app,
      "PUT",
      &format!("/api/v1/employees/{id}"),
      Some(json!({ "base_salary": 1500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["base_salary"], json!(1500));
    // Untouched fields survive.
    assert_eq!(updated["full_name"], "Alice");
    assert_eq!(updated["allowance"], json!(100));
    assert_eq!(updated["is_active"], json!(true));
  }

  #[tokio::test]
  async fn delete_employee_then_fetch_returns_404() {
    let app = test_app().await;
    let created = create_employee(&app, "EMP-001", "Alice", 1000, 100).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) =
      send(&app, "DELETE", &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
      send(&app, "GET", &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
      send(&app, "DELETE", &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Payroll generation ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn generate_counts_only_active_employees() {
    let app = test_app().await;
    create_employee(&app, "EMP-001", "Alice", 1000, 100).await;
    create_employee(&app, "EMP-002", "Bob", 2000, 0).await;
    let carol = create_employee(&app, "EMP-003", "Carol", 500, 50).await;
    deactivate(&app, &carol).await;

    let (status, body) = generate(&app, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_code"], "2024-06");
    assert_eq!(body["total_payslip"], json!(2));

    let (status, slips) =
      send(&app, "GET", "/api/v1/payroll/payslips/2024-06", None).await;
    assert_eq!(status, StatusCode::OK);

    let slips = slips.as_array().unwrap();
    assert_eq!(slips.len(), 2);
    assert_eq!(slips[0]["employee_name"], "Alice");
    assert_eq!(slips[0]["net_salary"], json!(1100));
    assert_eq!(slips[0]["deduction"], json!(0));
    assert_eq!(slips[1]["employee_name"], "Bob");
    assert_eq!(slips[1]["net_salary"], json!(2000));
  }

  #[tokio::test]
  async fn generate_with_no_employees_returns_zero() {
    let app = test_app().await;

    let (status, body) = generate(&app, "2024-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_payslip"], json!(0));

    // The period row exists but holds no payslips.
    let (status, _) =
      send(&app, "GET", "/api/v1/payroll/payslips/2024-06", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn generate_twice_appends_a_second_batch() {
    let app = test_app().await;
    create_employee(&app, "EMP-001", "Alice", 1000, 100).await;
    create_employee(&app, "EMP-002", "Bob", 2000, 0).await;

    let (_, first) = generate(&app, "2024-06").await;
    let (_, second) = generate(&app, "2024-06").await;
    assert_eq!(first["total_payslip"], json!(2));
    assert_eq!(second["total_payslip"], json!(2));

    // Re-running for the same period duplicates payslips.
    let (_, slips) =
      send(&app, "GET", "/api/v1/payroll/payslips/2024-06", None).await;
    assert_eq!(slips.as_array().unwrap().len(), 4);
  }

  #[tokio::test]
  async fn generate_with_blank_period_code_is_rejected() {
    let app = test_app().await;
    let (status, _) = generate(&app, "  ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn generate_accepts_an_explicit_window() {
    let app = test_app().await;
    create_employee(&app, "EMP-001", "Alice", 1000, 100).await;

    let (status, body) = send(
      &app,
      "POST",
      "/api/v1/payroll/generate",
      Some(json!({
        "period_code": "2024-06",
        "start_date": "2024-06-01",
        "end_date": "2024-06-30",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_payslip"], json!(1));
  }

  #[tokio::test]
  async fn generate_with_inverted_window_is_rejected() {
    let app = test_app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/api/v1/payroll/generate",
      Some(json!({
        "period_code": "2024-06",
        "start_date": "2024-06-30",
        "end_date": "2024-06-01",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn generate_with_half_a_window_is_rejected() {
    let app = test_app().await;
    let (status, _) = send(
      &app,
      "POST",
      "/api/v1/payroll/generate",
      Some(json!({
        "period_code": "2024-06",
        "start_date": "2024-06-01",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Payslip query ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn payslips_for_unknown_period_return_404() {
    let app = test_app().await;
    let (status, body) =
      send(&app, "GET", "/api/v1/payroll/payslips/missing-period", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn payslips_are_ordered_by_employee_name() {
    let app = test_app().await;
    create_employee(&app, "EMP-003", "Carol", 500, 0).await;
    create_employee(&app, "EMP-001", "Alice", 1000, 0).await;
    create_employee(&app, "EMP-002", "Bob", 2000, 0).await;

    generate(&app, "2024-06").await;

    let (_, slips) =
      send(&app, "GET", "/api/v1/payroll/payslips/2024-06", None).await;
    let names: Vec<_> = slips
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["employee_name"].as_str().unwrap().to_string())
      .collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
  }
}
