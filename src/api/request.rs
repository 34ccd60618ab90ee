//! Request types for the payroll engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_JURISDICTION;
use crate::models::{Employee, ExitReason, PayrollComponent, PayrollInput, SalaryStructure};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Jurisdiction code (e.g., "MH", "KA"). Defaults to [`DEFAULT_JURISDICTION`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// The employee being paid.
    pub employee: Employee,
    /// The employee's monthly salary structure.
    pub salary_structure: SalaryStructure,
    /// Attendance and recoveries for the period.
    pub attendance: PayrollInput,
}

/// Request body for the `/gratuity` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GratuityRequest {
    /// Jurisdiction code. Defaults to [`DEFAULT_JURISDICTION`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// The employee.
    pub employee: Employee,
    /// Current monthly basic salary.
    pub monthly_basic: Decimal,
    /// Exit reason. When present a payout is computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
    /// Date to measure service up to. Defaults to today (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/validate-run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRunRequest {
    /// Jurisdiction code. Defaults to [`DEFAULT_JURISDICTION`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// The payroll period, e.g. "2024-03".
    pub period: String,
    /// Components to validate.
    pub components: Vec<PayrollComponent>,
}

pub(crate) fn jurisdiction_or_default(jurisdiction: &Option<String>) -> &str {
    jurisdiction.as_deref().unwrap_or(DEFAULT_JURISDICTION)
}
