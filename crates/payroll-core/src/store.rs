//! The store traits implemented by storage backends.
//!
//! `payroll-store-sqlite` provides the concrete backend. The API layer and
//! the generation orchestrator depend on these abstractions, not on any
//! concrete backend.
//!
//! Absence is reported in-band (`None` / `false`); an `Err` from any method
//! always means the storage layer itself failed. Nothing here retries.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  employee::{Employee, EmployeeUpdate, NewEmployee},
  payslip::{NewPayslip, Payslip, PayslipWithEmployee},
  period::{PayrollPeriod, PeriodWindow},
};

// ─── Employee directory ──────────────────────────────────────────────────────

/// Abstraction over the employee directory.
pub trait EmployeeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List every employee, active or not, in insertion order. Payroll
  /// generation filters on `is_active` itself.
  fn list_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Create and persist an employee. The store assigns the id and
  /// timestamps; new records are always active.
  fn create_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Retrieve an employee by id. Returns `None` if not found.
  fn get_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Apply a partial update. Fields left `None` are unchanged. Returns the
  /// updated record, or `None` if the employee does not exist.
  fn update_employee(
    &self,
    id: Uuid,
    update: EmployeeUpdate,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Delete an employee. Returns `false` if the employee did not exist.
  fn delete_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Payroll storage ─────────────────────────────────────────────────────────

/// Abstraction over payroll period and payslip storage.
pub trait PayrollStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Atomic get-or-create of the period named `code`.
  ///
  /// The first call for a code persists it with `window` and `closed =
  /// false`; every later call returns the existing row unchanged and
  /// ignores `window`. Concurrent first use of the same code must hand the
  /// single winning row to both callers — never a duplicate row, never a
  /// constraint error.
  fn resolve_period<'a>(
    &'a self,
    code:   &'a str,
    window: PeriodWindow,
  ) -> impl Future<Output = Result<PayrollPeriod, Self::Error>> + Send + 'a;

  /// Persist one payslip. There is intentionally no uniqueness across
  /// (employee, period): each generation run appends its own batch.
  fn create_payslip(
    &self,
    input: NewPayslip,
  ) -> impl Future<Output = Result<Payslip, Self::Error>> + Send + '_;

  /// All payslips for the period named `code`, joined with employee names,
  /// ordered by employee full name ascending. Returns `None` when the
  /// period is unknown or has no payslips — distinct from a storage error.
  fn list_payslips<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<PayslipWithEmployee>>, Self::Error>> + Send + 'a;
}
