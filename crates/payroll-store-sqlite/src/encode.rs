//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and calendar dates as
//! `YYYY-MM-DD`. UUIDs are stored as hyphenated lowercase strings. Monetary
//! amounts are INTEGER minor currency units.

use chrono::{DateTime, NaiveDate, Utc};
use payroll_core::{
  employee::Employee,
  payslip::{Payslip, PayslipWithEmployee},
  period::PayrollPeriod,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub employee_id: String,
  pub code:        String,
  pub full_name:   String,
  pub email:       String,
  pub base_salary: i64,
  pub allowance:   i64,
  pub is_active:   bool,
  pub hire_date:   Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawEmployee {
  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id: decode_uuid(&self.employee_id)?,
      code:        self.code,
      full_name:   self.full_name,
      email:       self.email,
      base_salary: self.base_salary,
      allowance:   self.allowance,
      is_active:   self.is_active,
      hire_date:   self.hire_date.as_deref().map(decode_date).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `payroll_periods` row.
pub struct RawPeriod {
  pub period_id:  String,
  pub code:       String,
  pub start_date: String,
  pub end_date:   String,
  pub closed:     bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPeriod {
  pub fn into_period(self) -> Result<PayrollPeriod> {
    Ok(PayrollPeriod {
      period_id:  decode_uuid(&self.period_id)?,
      code:       self.code,
      start_date: decode_date(&self.start_date)?,
      end_date:   decode_date(&self.end_date)?,
      closed:     self.closed,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values from a `payslips` row joined with employee and period.
pub struct RawPayslipRow {
  pub payslip_id:        String,
  pub employee_id:       String,
  pub payroll_period_id: String,
  pub base_salary:       i64,
  pub allowance:         i64,
  pub deduction:         i64,
  pub net_salary:        i64,
  pub employee_name:     String,
  pub period_code:       String,
}

impl RawPayslipRow {
  pub fn into_row(self) -> Result<PayslipWithEmployee> {
    Ok(PayslipWithEmployee {
      payslip:       Payslip {
        payslip_id:        decode_uuid(&self.payslip_id)?,
        employee_id:       decode_uuid(&self.employee_id)?,
        payroll_period_id: decode_uuid(&self.payroll_period_id)?,
        base_salary:       self.base_salary,
        allowance:         self.allowance,
        deduction:         self.deduction,
        net_salary:        self.net_salary,
      },
      employee_name: self.employee_name,
      period_code:   self.period_code,
    })
  }
}
