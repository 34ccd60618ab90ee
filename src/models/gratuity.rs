//! Gratuity result models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculationStep;

/// Why an employee is leaving, which decides how much gratuity is payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Superannuation / retirement.
    Retirement,
    /// Voluntary resignation.
    Resignation,
    /// Termination by the employer.
    Termination,
}

/// Gratuity accrual (and optionally payout) for one employee.
///
/// Recomputed on demand from the current tenure; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityResult {
    /// The employee this result is for.
    pub employee_id: String,
    /// Completed service in years, rounded to 2 decimals.
    pub service_years: Decimal,
    /// Completed service in whole months.
    pub service_months: i32,
    /// Whether the minimum service requirement is met.
    pub is_eligible: bool,
    /// Days of basic salary earned, rounded to 2 decimals.
    pub days_earned: Decimal,
    /// Monthly basic divided by the month divisor, rounded.
    pub daily_basic: Decimal,
    /// Gratuity accrued to date.
    pub accrued_amount: Decimal,
    /// Gratuity accruing per month of further service.
    pub monthly_accrual: Decimal,
    /// The exit reason the payout was computed for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
    /// Payable amount, present only when a payout was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payable_amount: Option<Decimal>,
    /// Human-readable summary of the outcome.
    pub notes: String,
    /// Ordered calculation steps.
    pub calculations: Vec<CalculationStep>,
}

/// Gratuity totals across a set of employees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GratuitySummary {
    /// Sum of accrued amounts.
    pub total_accrued: Decimal,
    /// Sum of payable amounts for employees with an exit reason.
    pub total_payable: Decimal,
    /// Employees meeting the service requirement.
    pub eligible_count: usize,
    /// Employees below the service requirement.
    pub ineligible_count: usize,
    /// Per-employee results keyed by employee id.
    pub results: BTreeMap<String, GratuityResult>,
}
