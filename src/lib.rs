//! Statutory payroll engine for Indian payroll
//!
//! This crate computes an employee's monthly payroll from a salary structure
//! and attendance: prorated earnings, Provident Fund, Employee State
//! Insurance, professional tax, withholding tax (TDS) and net pay, with an
//! ordered audit trail. It also computes gratuity accruals and payouts,
//! validates computed results, and orchestrates batches and payroll runs
//! across employees. Statutory rules are loaded per jurisdiction from YAML.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod validation;
