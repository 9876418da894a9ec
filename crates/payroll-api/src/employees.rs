//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Full directory, insertion order |
//! | `POST`   | `/employees` | Body: [`CreateEmployeeBody`]; returns 201 |
//! | `GET`    | `/employees/:id` | 404 if not found |
//! | `PUT`    | `/employees/:id` | Partial update; absent fields unchanged |
//! | `DELETE` | `/employees/:id` | 204, or 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use payroll_core::{
  employee::{Employee, EmployeeUpdate, NewEmployee},
  store::{EmployeeStore, PayrollStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Response shape ──────────────────────────────────────────────────────────

/// JSON rendering of an [`Employee`].
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
  pub id:          Uuid,
  pub code:        String,
  pub full_name:   String,
  pub email:       String,
  pub base_salary: i64,
  pub allowance:   i64,
  pub is_active:   bool,
  pub hire_date:   Option<NaiveDate>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
  fn from(e: Employee) -> Self {
    Self {
      id:          e.employee_id,
      code:        e.code,
      full_name:   e.full_name,
      email:       e.email,
      base_salary: e.base_salary,
      allowance:   e.allowance,
      is_active:   e.is_active,
      hire_date:   e.hire_date,
      created_at:  e.created_at,
      updated_at:  e.updated_at,
    }
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /employees`
pub async fn list<E, P>(
  State(state): State<ApiState<E, P>>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  let employees = state
    .employees
    .list_employees()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeBody {
  pub code:        String,
  pub full_name:   String,
  pub email:       String,
  pub base_salary: i64,
  #[serde(default)]
  pub allowance:   i64,
  pub hire_date:   Option<NaiveDate>,
}

impl CreateEmployeeBody {
  fn validate(&self) -> Result<(), ApiError> {
    if self.code.trim().is_empty() {
      return Err(ApiError::BadRequest("code must not be empty".to_string()));
    }
    if self.full_name.trim().is_empty() {
      return Err(ApiError::BadRequest("full_name must not be empty".to_string()));
    }
    if !self.email.contains('@') {
      return Err(ApiError::BadRequest("email is not a valid address".to_string()));
    }
    Ok(())
  }
}

impl From<CreateEmployeeBody> for NewEmployee {
  fn from(b: CreateEmployeeBody) -> Self {
    NewEmployee {
      code:        b.code,
      full_name:   b.full_name,
      email:       b.email,
      base_salary: b.base_salary,
      allowance:   b.allowance,
      hire_date:   b.hire_date,
    }
  }
}

/// `POST /employees` — returns 201 + the stored employee.
pub async fn create<E, P>(
  State(state): State<ApiState<E, P>>,
  Json(body): Json<CreateEmployeeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  body.validate()?;

  let employee = state
    .employees
    .create_employee(NewEmployee::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /employees/:id`
pub async fn get_one<E, P>(
  State(state): State<ApiState<E, P>>,
  Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  let employee = state
    .employees
    .get_employee(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(EmployeeResponse::from(employee)))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// JSON body for `PUT /employees/:id`. Every field is optional; absent
/// fields leave the stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeBody {
  pub full_name:   Option<String>,
  pub email:       Option<String>,
  pub base_salary: Option<i64>,
  pub allowance:   Option<i64>,
  pub hire_date:   Option<NaiveDate>,
  pub is_active:   Option<bool>,
}

impl From<UpdateEmployeeBody> for EmployeeUpdate {
  fn from(b: UpdateEmployeeBody) -> Self {
    EmployeeUpdate {
      full_name:   b.full_name,
      email:       b.email,
      base_salary: b.base_salary,
      allowance:   b.allowance,
      hire_date:   b.hire_date,
      is_active:   b.is_active,
    }
  }
}

/// `PUT /employees/:id`
pub async fn update_one<E, P>(
  State(state): State<ApiState<E, P>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateEmployeeBody>,
) -> Result<Json<EmployeeResponse>, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  if let Some(email) = &body.email
    && !email.contains('@')
  {
    return Err(ApiError::BadRequest("email is not a valid address".to_string()));
  }

  let employee = state
    .employees
    .update_employee(id, EmployeeUpdate::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(EmployeeResponse::from(employee)))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /employees/:id`
pub async fn delete_one<E, P>(
  State(state): State<ApiState<E, P>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  E: EmployeeStore + 'static,
  P: PayrollStore + 'static,
{
  let deleted = state
    .employees
    .delete_employee(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !deleted {
    return Err(ApiError::NotFound(format!("employee {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
