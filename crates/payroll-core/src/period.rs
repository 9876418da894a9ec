//! Payroll periods — named, date-bounded payroll cycles.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted payroll period.
///
/// At most one row exists per code, and the code is immutable once created.
/// Periods are created lazily by the first generation run that names them and
/// are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollPeriod {
  pub period_id:  Uuid,
  /// Human-assigned code, e.g. `"2024-06"`.
  pub code:       String,
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
  /// Reserved for period close-out; no code path sets this yet.
  pub closed:     bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The date window recorded when a period is first created. Ignored when the
/// period already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl PeriodWindow {
  /// The window covering the `days` days ending today (UTC).
  pub fn trailing(days: i64) -> Self {
    let end = Utc::now().date_naive();
    Self { start: end - Duration::days(days), end }
  }
}
