//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Generation stopped mid-run. The payslips persisted before the failure
  /// are kept, so their count is part of the response.
  #[error("payroll generation halted after {created} payslips: {source}")]
  Generation {
    created: usize,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
      ApiError::Generation { created, source } => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": source.to_string(), "total_payslip": created }),
      ),
    };
    (status, Json(body)).into_response()
  }
}
