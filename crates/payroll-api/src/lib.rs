//! JSON REST API for the payroll service.
//!
//! Exposes an axum [`Router`] backed by any backend implementing the
//! [`EmployeeStore`] and [`PayrollStore`] traits. Transport, TLS, and
//! request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", payroll_api::api_router(store.clone()))
//! ```

pub mod employees;
pub mod error;
pub mod payroll;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use payroll_core::{
  service::PayrollService,
  store::{EmployeeStore, PayrollStore},
};

pub use error::ApiError;

/// Shared state threaded through all handlers: the employee directory plus
/// the generation orchestrator built over it.
pub struct ApiState<E, P> {
  pub employees: Arc<E>,
  pub payroll:   PayrollService<E, P>,
}

impl<E, P> Clone for ApiState<E, P> {
  fn clone(&self) -> Self {
    Self {
      employees: Arc::clone(&self.employees),
      payroll:   self.payroll.clone(),
    }
  }
}

/// Build a fully-materialised API router over a single backend implementing
/// both store traits.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EmployeeStore + PayrollStore + 'static,
{
  let state = ApiState {
    employees: Arc::clone(&store),
    payroll:   PayrollService::new(Arc::clone(&store), store),
  };

  Router::new()
    // Employee directory
    .route(
      "/employees",
      get(employees::list::<S, S>).post(employees::create::<S, S>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<S, S>)
        .put(employees::update_one::<S, S>)
        .delete(employees::delete_one::<S, S>),
    )
    // Payroll
    .route("/payroll/generate", post(payroll::generate::<S, S>))
    .route(
      "/payroll/payslips/{period_code}",
      get(payroll::list_payslips::<S, S>),
    )
    .with_state(state)
}
