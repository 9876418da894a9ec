//! Handlers for `/payroll` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/payroll/generate` | Body: [`GenerateBody`]; one payslip per active employee |
//! | `GET`  | `/payroll/payslips/:period_code` | 404 when the period has no payslips |

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use payroll_core::{
  error::GenerateError,
  payslip::PayslipWithEmployee,
  period::PeriodWindow,
  store::{EmployeeStore, PayrollStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// Days covered by the window recorded when a request creates a period
/// without supplying dates of its own.
const DEFAULT_WINDOW_DAYS: i64 = 30;

// ─── Generate ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
  pub period_code: String,
  /// Window recorded if this request creates the period; ignored when the
  /// period already exists. Defaults to the trailing 30 days.
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
  pub period_code:   String,
  pub total_payslip: usize,
}

/// `POST /payroll/generate`
pub async fn generate<E, P>(
  State(state): State<ApiState<E, P>>,
  Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  if body.period_code.trim().is_empty() {
    return Err(ApiError::BadRequest("period_code must not be empty".to_string()));
  }

  let window = match (body.start_date, body.end_date) {
    (Some(start), Some(end)) if start <= end => PeriodWindow { start, end },
    (Some(_), Some(_)) => {
      return Err(ApiError::BadRequest(
        "start_date must not be after end_date".to_string(),
      ));
    }
    (None, None) => PeriodWindow::trailing(DEFAULT_WINDOW_DAYS),
    _ => {
      return Err(ApiError::BadRequest(
        "start_date and end_date must be supplied together".to_string(),
      ));
    }
  };

  let run = state
    .payroll
    .generate(&body.period_code, window)
    .await
    .map_err(|e| match e {
      GenerateError::Partial { created, source } => ApiError::Generation {
        created,
        source: Box::new(source),
      },
      GenerateError::Directory(e) => ApiError::Store(Box::new(e)),
      GenerateError::Payroll(e) => ApiError::Store(Box::new(e)),
    })?;

  Ok(Json(GenerateResponse {
    period_code:   run.period.code,
    total_payslip: run.created,
  }))
}

// ─── List payslips ───────────────────────────────────────────────────────────

/// JSON rendering of one row of the payslip report.
#[derive(Debug, Serialize)]
pub struct PayslipResponse {
  pub id:            Uuid,
  pub employee_id:   Uuid,
  pub employee_name: String,
  pub period_code:   String,
  pub base_salary:   i64,
  pub allowance:     i64,
  pub deduction:     i64,
  pub net_salary:    i64,
}

impl From<PayslipWithEmployee> for PayslipResponse {
  fn from(row: PayslipWithEmployee) -> Self {
    Self {
      id:            row.payslip.payslip_id,
      employee_id:   row.payslip.employee_id,
      employee_name: row.employee_name,
      period_code:   row.period_code,
      base_salary:   row.payslip.base_salary,
      allowance:     row.payslip.allowance,
      deduction:     row.payslip.deduction,
      net_salary:    row.payslip.net_salary,
    }
  }
}

/// `GET /payroll/payslips/:period_code`
pub async fn list_payslips<E, P>(
  State(state): State<ApiState<E, P>>,
  Path(period_code): Path<String>,
) -> Result<Json<Vec<PayslipResponse>>, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  let rows = state
    .payroll
    .payslips(&period_code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("no payslips for period {period_code:?}")))?;

  Ok(Json(rows.into_iter().map(PayslipResponse::from).collect()))
}
