//! Per-employee payroll component.
//!
//! A component pairs a [`CalculationResult`] with the attendance it was
//! computed from. It is the unit the result validator checks and the unit a
//! payroll run aggregates.

use serde::{Deserialize, Serialize};

use super::{CalculationResult, PayrollInput};

/// One employee's computed payroll within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComponent {
    /// The employee this component belongs to.
    pub employee_id: String,
    /// Salary structure the result was computed from, if known.
    #[serde(default)]
    pub salary_structure_id: Option<String>,
    /// Attendance the result was computed from.
    pub attendance: PayrollInput,
    /// The computed figures.
    pub result: CalculationResult,
    /// Whether the component passed component-level validation.
    #[serde(default)]
    pub is_validated: bool,
}

impl PayrollComponent {
    /// Wraps a fresh calculation result. The component starts unvalidated.
    pub fn from_result(
        employee_id: impl Into<String>,
        salary_structure_id: Option<String>,
        attendance: PayrollInput,
        result: CalculationResult,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            salary_structure_id,
            attendance,
            result,
            is_validated: false,
        }
    }
}
