//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod calculation_result;
mod component;
mod employee;
mod gratuity;
mod salary;
mod validation;

pub use attendance::{DEFAULT_DAYS_IN_MONTH, PayrollInput};
pub use calculation_result::{CalculationResult, CalculationStep, StepCategory};
pub use component::PayrollComponent;
pub use employee::{Employee, EmploymentStatus};
pub use gratuity::{ExitReason, GratuityResult, GratuitySummary};
pub use salary::SalaryStructure;
pub use validation::{Severity, ValidationCategory, ValidationError};
