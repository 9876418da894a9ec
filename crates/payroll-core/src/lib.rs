//! Core types and trait definitions for the payroll service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod employee;
pub mod error;
pub mod payslip;
pub mod period;
pub mod service;
pub mod store;

pub use error::GenerateError;
