//! Payslip types and the computation rule.
//!
//! All monetary arithmetic in this module is integer arithmetic on minor
//! currency units. No rounding or floating point is permitted anywhere in
//! the payroll path.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{employee::Employee, period::PayrollPeriod};

/// A persisted payslip. Written once per employee per generation run; never
/// updated or deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payslip {
  pub payslip_id:        Uuid,
  pub employee_id:       Uuid,
  pub payroll_period_id: Uuid,
  pub base_salary:       i64,
  pub allowance:         i64,
  pub deduction:         i64,
  pub net_salary:        i64,
}

/// Input for persisting a payslip; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPayslip {
  pub employee_id:       Uuid,
  pub payroll_period_id: Uuid,
  pub base_salary:       i64,
  pub allowance:         i64,
  pub deduction:         i64,
  pub net_salary:        i64,
}

/// A payslip joined with employee identity and period code, for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipWithEmployee {
  pub payslip:       Payslip,
  pub employee_name: String,
  pub period_code:   String,
}

/// Compute the payslip for one employee in one period.
///
/// Pure and deterministic: reads only the salary components and the two ids.
/// The deduction is a placeholder for statutory logic and is currently
/// always zero, so `net = base + allowance`. The calculator never looks at
/// `is_active` — filtering inactive employees is the orchestrator's job.
pub fn compute_payslip(employee: &Employee, period: &PayrollPeriod) -> NewPayslip {
  let deduction = 0;
  NewPayslip {
    employee_id:       employee.employee_id,
    payroll_period_id: period.period_id,
    base_salary:       employee.base_salary,
    allowance:         employee.allowance,
    deduction,
    net_salary:        employee.base_salary + employee.allowance - deduction,
  }
}
