//! SQL schema for the payroll SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    employee_id TEXT PRIMARY KEY,
    code        TEXT NOT NULL UNIQUE,   -- human-assigned, e.g. 'EMP-001'
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    base_salary INTEGER NOT NULL,       -- minor currency units
    allowance   INTEGER NOT NULL DEFAULT 0,
    is_active   INTEGER NOT NULL DEFAULT 1,
    hire_date   TEXT,                   -- 'YYYY-MM-DD' or NULL
    created_at  TEXT NOT NULL,          -- ISO 8601 UTC; store-assigned
    updated_at  TEXT NOT NULL
);

-- One row per period code; the UNIQUE constraint is the final arbiter when
-- two generation runs race on first use of a code.
CREATE TABLE IF NOT EXISTS payroll_periods (
    period_id  TEXT PRIMARY KEY,
    code       TEXT NOT NULL UNIQUE,    -- human-assigned, e.g. '2024-06'
    start_date TEXT NOT NULL,
    end_date   TEXT NOT NULL,
    closed     INTEGER NOT NULL DEFAULT 0,  -- reserved; nothing sets it yet
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- No uniqueness across (employee_id, payroll_period_id): re-running
-- generation for a period appends a fresh batch of payslips.
CREATE TABLE IF NOT EXISTS payslips (
    payslip_id        TEXT PRIMARY KEY,
    employee_id       TEXT NOT NULL REFERENCES employees(employee_id),
    payroll_period_id TEXT NOT NULL REFERENCES payroll_periods(period_id),
    base_salary       INTEGER NOT NULL,
    allowance         INTEGER NOT NULL,
    deduction         INTEGER NOT NULL,
    net_salary        INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS payslips_period_idx   ON payslips(payroll_period_id);
CREATE INDEX IF NOT EXISTS payslips_employee_idx ON payslips(employee_id);

PRAGMA user_version = 1;
";
