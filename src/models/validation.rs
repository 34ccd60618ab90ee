//! Validation diagnostic model.
//!
//! Diagnostics are produced fresh on every validation pass and never
//! persisted by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
///
/// `Error` blocks run finalization, `Warning` is surfaced to operators but
/// does not block, `Info` is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks finalization.
    Error,
    /// Needs attention, does not block.
    Warning,
    /// Advisory.
    Info,
}

/// The area a diagnostic concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCategory {
    /// Earnings and salary structure.
    Salary,
    /// Statutory and other deductions.
    Deductions,
    /// Days worked / absent / leave.
    Attendance,
    /// Employee record completeness.
    Employee,
    /// Run-level totals.
    Payroll,
    /// Validation bookkeeping.
    Validation,
    /// Advisory notes about how statutory rules applied.
    Statutory,
}

/// A single validation diagnostic.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Severity, ValidationCategory, ValidationError};
///
/// let diagnostic = ValidationError::new(
///     "MISSING_PAN",
///     Severity::Warning,
///     ValidationCategory::Employee,
///     "Employee does not have PAN",
/// )
/// .for_employee("emp_001");
///
/// assert!(!diagnostic.is_error());
/// assert_eq!(diagnostic.employee_id.as_deref(), Some("emp_001"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Stable code for programmatic handling (e.g., "NEGATIVE_NET_PAY").
    pub code: String,
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Area the diagnostic concerns.
    pub category: ValidationCategory,
    /// Human-readable message.
    pub message: String,
    /// The offending amount, if one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// The employee the diagnostic refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl ValidationError {
    /// Creates a diagnostic without amount or employee reference.
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        category: ValidationCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            category,
            message: message.into(),
            amount: None,
            employee_id: None,
        }
    }

    /// Attaches the offending amount.
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Attaches the employee reference.
    pub fn for_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    /// Returns true for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
