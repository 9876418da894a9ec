//! [`SqliteStore`] — the SQLite implementation of [`EmployeeStore`] and
//! [`PayrollStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use payroll_core::{
  employee::{Employee, EmployeeUpdate, NewEmployee},
  payslip::{NewPayslip, Payslip, PayslipWithEmployee},
  period::{PayrollPeriod, PeriodWindow},
  store::{EmployeeStore, PayrollStore},
};

use crate::{
  Error, Result,
  encode::{RawEmployee, RawPayslipRow, RawPeriod, encode_date, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A payroll store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation is a single `conn.call` closure, so multi-statement operations
/// (get-or-create, read-modify-write) are serialised on the connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn read_employee(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEmployee> {
  Ok(RawEmployee {
    employee_id: row.get(0)?,
    code:        row.get(1)?,
    full_name:   row.get(2)?,
    email:       row.get(3)?,
    base_salary: row.get(4)?,
    allowance:   row.get(5)?,
    is_active:   row.get(6)?,
    hire_date:   row.get(7)?,
    created_at:  row.get(8)?,
    updated_at:  row.get(9)?,
  })
}

fn read_period(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPeriod> {
  Ok(RawPeriod {
    period_id:  row.get(0)?,
    code:       row.get(1)?,
    start_date: row.get(2)?,
    end_date:   row.get(3)?,
    closed:     row.get(4)?,
    created_at: row.get(5)?,
    updated_at: row.get(6)?,
  })
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn list_employees(&self) -> Result<Vec<Employee>> {
    let raws: Vec<RawEmployee> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT employee_id, code, full_name, email, base_salary, allowance,
                  is_active, hire_date, created_at, updated_at
           FROM employees
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], read_employee)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn create_employee(&self, input: NewEmployee) -> Result<Employee> {
    let now = Utc::now();
    let employee = Employee {
      employee_id: Uuid::new_v4(),
      code:        input.code,
      full_name:   input.full_name,
      email:       input.email,
      base_salary: input.base_salary,
      allowance:   input.allowance,
      is_active:   true,
      hire_date:   input.hire_date,
      created_at:  now,
      updated_at:  now,
    };

    let id_str        = encode_uuid(employee.employee_id);
    let code          = employee.code.clone();
    let full_name     = employee.full_name.clone();
    let email         = employee.email.clone();
    let base_salary   = employee.base_salary;
    let allowance     = employee.allowance;
    let hire_date_str = employee.hire_date.map(encode_date);
    let at_str        = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (employee_id, code, full_name, email, base_salary,
                                  allowance, is_active, hire_date, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8, ?8)",
          rusqlite::params![
            id_str,
            code,
            full_name,
            email,
            base_salary,
            allowance,
            hire_date_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(employee)
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT employee_id, code, full_name, email, base_salary, allowance,
                      is_active, hire_date, created_at, updated_at
               FROM employees
               WHERE employee_id = ?1",
              rusqlite::params![id_str],
              read_employee,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn update_employee(
    &self,
    id:     Uuid,
    update: EmployeeUpdate,
  ) -> Result<Option<Employee>> {
    let id_str        = encode_uuid(id);
    let full_name     = update.full_name;
    let email         = update.email;
    let base_salary   = update.base_salary;
    let allowance     = update.allowance;
    let hire_date_str = update.hire_date.map(encode_date);
    let is_active     = update.is_active;
    let at_str        = encode_dt(Utc::now());

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        // NULL parameters fall through to the current column value, so
        // absent fields stay untouched.
        let affected = conn.execute(
          "UPDATE employees SET
             full_name   = COALESCE(?2, full_name),
             email       = COALESCE(?3, email),
             base_salary = COALESCE(?4, base_salary),
             allowance   = COALESCE(?5, allowance),
             hire_date   = COALESCE(?6, hire_date),
             is_active   = COALESCE(?7, is_active),
             updated_at  = ?8
           WHERE employee_id = ?1",
          rusqlite::params![
            id_str,
            full_name,
            email,
            base_salary,
            allowance,
            hire_date_str,
            is_active,
            at_str,
          ],
        )?;

        if affected == 0 {
          return Ok(None);
        }

        Ok(
          conn
            .query_row(
              "SELECT employee_id, code, full_name, email, base_salary, allowance,
                      is_active, hire_date, created_at, updated_at
               FROM employees
               WHERE employee_id = ?1",
              rusqlite::params![id_str],
              read_employee,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn delete_employee(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM employees WHERE employee_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}

// ─── PayrollStore impl ───────────────────────────────────────────────────────

impl PayrollStore for SqliteStore {
  type Error = Error;

  async fn resolve_period(
    &self,
    code:   &str,
    window: PeriodWindow,
  ) -> Result<PayrollPeriod> {
    let id_str     = encode_uuid(Uuid::new_v4());
    let code_owned = code.to_owned();
    let start_str  = encode_date(window.start);
    let end_str    = encode_date(window.end);
    let at_str     = encode_dt(Utc::now());

    let raw: RawPeriod = self
      .conn
      .call(move |conn| {
        // Losing the insert race (or hitting an existing code) is a no-op;
        // the read below then returns the surviving row.
        conn.execute(
          "INSERT INTO payroll_periods (period_id, code, start_date, end_date,
                                        closed, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
           ON CONFLICT(code) DO NOTHING",
          rusqlite::params![id_str, code_owned, start_str, end_str, at_str],
        )?;

        Ok(conn.query_row(
          "SELECT period_id, code, start_date, end_date, closed, created_at, updated_at
           FROM payroll_periods
           WHERE code = ?1",
          rusqlite::params![code_owned],
          read_period,
        )?)
      })
      .await?;

    raw.into_period()
  }

  async fn create_payslip(&self, input: NewPayslip) -> Result<Payslip> {
    let payslip = Payslip {
      payslip_id:        Uuid::new_v4(),
      employee_id:       input.employee_id,
      payroll_period_id: input.payroll_period_id,
      base_salary:       input.base_salary,
      allowance:         input.allowance,
      deduction:         input.deduction,
      net_salary:        input.net_salary,
    };

    let id_str          = encode_uuid(payslip.payslip_id);
    let employee_id_str = encode_uuid(payslip.employee_id);
    let period_id_str   = encode_uuid(payslip.payroll_period_id);
    let base_salary     = payslip.base_salary;
    let allowance       = payslip.allowance;
    let deduction       = payslip.deduction;
    let net_salary      = payslip.net_salary;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO payslips (payslip_id, employee_id, payroll_period_id,
                                 base_salary, allowance, deduction, net_salary)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            employee_id_str,
            period_id_str,
            base_salary,
            allowance,
            deduction,
            net_salary,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(payslip)
  }

  async fn list_payslips(&self, code: &str) -> Result<Option<Vec<PayslipWithEmployee>>> {
    let code_owned = code.to_owned();

    let raws: Vec<RawPayslipRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT ps.payslip_id, ps.employee_id, ps.payroll_period_id,
                  ps.base_salary, ps.allowance, ps.deduction, ps.net_salary,
                  e.full_name  AS employee_name,
                  pp.code      AS period_code
           FROM payslips ps
           JOIN employees       e  ON e.employee_id = ps.employee_id
           JOIN payroll_periods pp ON pp.period_id  = ps.payroll_period_id
           WHERE pp.code = ?1
           ORDER BY e.full_name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![code_owned], |row| {
            Ok(RawPayslipRow {
              payslip_id:        row.get(0)?,
              employee_id:       row.get(1)?,
              payroll_period_id: row.get(2)?,
              base_salary:       row.get(3)?,
              allowance:         row.get(4)?,
              deduction:         row.get(5)?,
              net_salary:        row.get(6)?,
              employee_name:     row.get(7)?,
              period_code:       row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // An unknown period and a period with zero payslips both look the same
    // here: no rows. Both are the not-found signal.
    if raws.is_empty() {
      return Ok(None);
    }

    raws
      .into_iter()
      .map(RawPayslipRow::into_row)
      .collect::<Result<Vec<_>>>()
      .map(Some)
  }
}
