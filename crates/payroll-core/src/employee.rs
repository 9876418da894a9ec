//! Employee directory types.
//!
//! The directory is the source of truth for employee identity, salary
//! components, and the active flag that gates payroll inclusion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted employee record.
///
/// Payroll generation reads only the id, the two salary components, and
/// `is_active`; everything else belongs to the directory's own surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id: Uuid,
  /// Human-assigned code, unique across the directory.
  pub code:        String,
  pub full_name:   String,
  pub email:       String,
  /// Base salary in minor currency units.
  pub base_salary: i64,
  /// Recurring allowance in minor currency units.
  pub allowance:   i64,
  pub is_active:   bool,
  pub hire_date:   Option<NaiveDate>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input for creating an employee. The store assigns the id and timestamps
/// and always creates the record active.
#[derive(Debug, Clone)]
pub struct NewEmployee {
  pub code:        String,
  pub full_name:   String,
  pub email:       String,
  pub base_salary: i64,
  pub allowance:   i64,
  pub hire_date:   Option<NaiveDate>,
}

/// A partial update. Each field is applied only when present; fields left
/// `None` are unchanged.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
  pub full_name:   Option<String>,
  pub email:       Option<String>,
  pub base_salary: Option<i64>,
  pub allowance:   Option<i64>,
  pub hire_date:   Option<NaiveDate>,
  pub is_active:   Option<bool>,
}
