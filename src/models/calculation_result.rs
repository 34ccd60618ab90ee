//! Calculation result models for the payroll engine.
//!
//! This module contains the [`CalculationResult`] type and the
//! [`CalculationStep`] audit records produced by the payroll calculator.
//! Downstream consumers (payslips, bank files, statutory returns) treat this
//! field set as their entire input and never recompute a figure themselves.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The stage of the calculation that produced an audit step.
///
/// # Example
///
/// ```
/// use payroll_engine::models::StepCategory;
///
/// assert_eq!(StepCategory::Pf.as_str(), "pf");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCategory {
    /// Prorated earnings.
    Earnings,
    /// Provident Fund contributions.
    Pf,
    /// Employee State Insurance contributions.
    Esi,
    /// Professional tax.
    Pt,
    /// Withholding tax.
    Tds,
    /// Fixed recoveries and other deductions.
    Deductions,
    /// Gratuity accrual and payout.
    Gratuity,
    /// Totals (gross, total deductions, net pay).
    Summary,
}

impl StepCategory {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepCategory::Earnings => "earnings",
            StepCategory::Pf => "pf",
            StepCategory::Esi => "esi",
            StepCategory::Pt => "pt",
            StepCategory::Tds => "tds",
            StepCategory::Deductions => "deductions",
            StepCategory::Gratuity => "gratuity",
            StepCategory::Summary => "summary",
        }
    }
}

/// A single step in the audit trail recording one computed quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStep {
    /// The stage that produced this step.
    pub category: StepCategory,
    /// Human-readable description (e.g., "PF - Employee Contribution").
    pub description: String,
    /// The amount this step produced.
    pub amount: Decimal,
    /// The formula with the actual figures substituted.
    pub formula: String,
}

impl CalculationStep {
    /// Creates a new audit step.
    pub fn new(
        category: StepCategory,
        description: impl Into<String>,
        amount: Decimal,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            category,
            description: description.into(),
            amount,
            formula: formula.into(),
        }
    }
}

/// The complete, itemized result of one employee's payroll computation.
///
/// The struct holds no timestamps or generated identifiers, so identical
/// inputs always produce an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Clamped `days_worked / days_in_month` used for every earning.
    pub proration_factor: Decimal,

    /// Prorated basic pay.
    pub basic_pay: Decimal,
    /// Prorated dearness allowance.
    pub dearness_allowance: Decimal,
    /// Prorated house rent allowance.
    pub house_rent_allowance: Decimal,
    /// Prorated other allowances.
    pub other_allowances: Decimal,
    /// Sum of the four earnings.
    pub gross_amount: Decimal,

    /// Employee Provident Fund contribution.
    pub pf_employee: Decimal,
    /// Employer Provident Fund contribution.
    pub pf_employer: Decimal,
    /// Employee ESI contribution.
    pub esi_employee: Decimal,
    /// Employer ESI contribution.
    pub esi_employer: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,

    /// Withholding tax (TDS).
    pub tds: Decimal,

    /// Advance recovery.
    pub advance_recovery: Decimal,
    /// Loan recovery.
    pub loan_recovery: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,

    /// Employee statutory contributions (PF + ESI + PT).
    pub total_employee_contributions: Decimal,
    /// Employer statutory contributions (PF + ESI).
    pub total_employer_contributions: Decimal,
    /// Every deduction taken from gross pay.
    pub total_deductions: Decimal,
    /// Gross less total deductions, floored at zero.
    pub net_pay: Decimal,

    /// Ordered audit trail.
    pub calculations: Vec<CalculationStep>,
}

impl CalculationResult {
    /// Returns the audit steps of a given category, in order.
    pub fn steps_for(&self, category: StepCategory) -> impl Iterator<Item = &CalculationStep> {
        self.calculations
            .iter()
            .filter(move |step| step.category == category)
    }
}
