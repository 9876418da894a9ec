//! Error types for `payroll-core`.

use thiserror::Error;

/// Failure modes of a payroll generation run.
///
/// `D` is the employee directory's error type, `P` the payroll store's.
/// `Partial` carries the number of payslips persisted before the failing
/// write; those rows are kept (there is no cross-employee rollback).
#[derive(Debug, Error)]
pub enum GenerateError<D, P>
where
  D: std::error::Error + 'static,
  P: std::error::Error + 'static,
{
  /// The employee directory could not be read.
  #[error("employee directory error: {0}")]
  Directory(#[source] D),

  /// Period resolution failed.
  #[error("payroll storage error: {0}")]
  Payroll(#[source] P),

  /// A payslip write failed mid-run. Employees not yet processed were
  /// skipped; the run does not resume.
  #[error("generation halted after {created} payslips: {source}")]
  Partial {
    created: usize,
    #[source]
    source:  P,
  },
}
