//! The payroll generation orchestrator and payslip query.

use std::sync::Arc;

use crate::{
  error::GenerateError,
  payslip::{PayslipWithEmployee, compute_payslip},
  period::{PayrollPeriod, PeriodWindow},
  store::{EmployeeStore, PayrollStore},
};

/// Outcome of a successful generation run.
#[derive(Debug, Clone)]
pub struct GenerationRun {
  /// The resolved period (created on first use of its code).
  pub period:  PayrollPeriod,
  /// Number of payslips created by this invocation.
  pub created: usize,
}

/// Drives payroll generation and payslip reads over the two stores.
///
/// Dependencies are constructor-injected; there is no global wiring. The
/// service holds no mutable state of its own, so cloning is cheap and one
/// instance can serve concurrent requests.
pub struct PayrollService<E, P> {
  employees: Arc<E>,
  payroll:   Arc<P>,
}

impl<E, P> Clone for PayrollService<E, P> {
  fn clone(&self) -> Self {
    Self {
      employees: Arc::clone(&self.employees),
      payroll:   Arc::clone(&self.payroll),
    }
  }
}

impl<E, P> PayrollService<E, P>
where
  E: EmployeeStore,
  P: PayrollStore,
{
  pub fn new(employees: Arc<E>, payroll: Arc<P>) -> Self {
    Self { employees, payroll }
  }

  /// Run payroll generation for the period named `code`.
  ///
  /// Resolves the period (creating it with `window` on first use), reads
  /// the full directory, then computes and persists one payslip per active
  /// employee — strictly sequentially, in directory order. The first failed
  /// write aborts the run: payslips persisted before it are kept, and their
  /// count travels with the [`GenerateError::Partial`] error.
  ///
  /// Re-running for the same code resolves the same period row but appends
  /// a fresh batch of payslips. Zero active employees is not an error; the
  /// run returns a zero count with the period still created.
  pub async fn generate(
    &self,
    code:   &str,
    window: PeriodWindow,
  ) -> Result<GenerationRun, GenerateError<E::Error, P::Error>> {
    let period = self
      .payroll
      .resolve_period(code, window)
      .await
      .map_err(GenerateError::Payroll)?;

    let employees = self
      .employees
      .list_employees()
      .await
      .map_err(GenerateError::Directory)?;

    let mut created = 0;
    for employee in employees.iter().filter(|e| e.is_active) {
      let slip = compute_payslip(employee, &period);
      match self.payroll.create_payslip(slip).await {
        Ok(_) => created += 1,
        Err(source) => return Err(GenerateError::Partial { created, source }),
      }
    }

    Ok(GenerationRun { period, created })
  }

  /// All payslips for the period named `code`, ordered by employee name.
  /// `None` when the period is unknown or has none.
  pub async fn payslips(
    &self,
    code: &str,
  ) -> Result<Option<Vec<PayslipWithEmployee>>, P::Error> {
    self.payroll.list_payslips(code).await
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
