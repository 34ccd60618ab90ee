//! Prorated earnings calculation.
//!
//! Every salary component is prorated by the same attendance factor and
//! rounded immediately. Gross is the sum of the rounded components.

use rust_decimal::Decimal;

use crate::models::{CalculationStep, PayrollInput, SalaryStructure, StepCategory};

use super::rounding::{fmt_factor, fmt_money, proration_factor, round_money};

/// The result of the earnings stage.
#[derive(Debug, Clone)]
pub struct EarningsResult {
    /// Clamped `days_worked / days_in_month`.
    pub proration_factor: Decimal,
    /// Prorated basic pay.
    pub basic_pay: Decimal,
    /// Prorated dearness allowance.
    pub dearness_allowance: Decimal,
    /// Prorated house rent allowance.
    pub house_rent_allowance: Decimal,
    /// Prorated other allowances.
    pub other_allowances: Decimal,
    /// Sum of the prorated components.
    pub gross_amount: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Prorates the salary structure by attendance.
///
/// Basic pay and gross always produce an audit step. DA, HRA and other
/// allowances produce one only when the prorated amount is positive.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_earnings;
/// use payroll_engine::models::{PayrollInput, SalaryStructure};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let salary = SalaryStructure::basic_only(Decimal::from(30000));
/// let mut input = PayrollInput::full_month(30);
/// input.days_worked = 20;
///
/// let result = calculate_earnings(&salary, &input);
/// assert_eq!(result.basic_pay, Decimal::from(20000));
/// assert_eq!(result.gross_amount, Decimal::from(20000));
/// ```
pub fn calculate_earnings(salary: &SalaryStructure, input: &PayrollInput) -> EarningsResult {
    let factor = proration_factor(input.days_worked, input.days_in_month);
    let days_label = format!("{}/{} days", input.days_worked, input.days_in_month);

    let basic_pay = round_money(salary.monthly_basic * factor);
    let dearness_allowance = round_money(salary.monthly_da * factor);
    let house_rent_allowance = round_money(salary.monthly_hra * factor);
    let other_allowances = round_money(salary.monthly_allowance * factor);

    let mut audit_steps = vec![CalculationStep::new(
        StepCategory::Earnings,
        format!("Basic Pay ({days_label})"),
        basic_pay,
        prorated_formula(salary.monthly_basic, factor, basic_pay),
    )];

    let optional = [
        ("Dearness Allowance", salary.monthly_da, dearness_allowance),
        ("House Rent Allowance", salary.monthly_hra, house_rent_allowance),
        ("Other Allowances", salary.monthly_allowance, other_allowances),
    ];
    for (label, monthly, prorated) in optional {
        if prorated > Decimal::ZERO {
            audit_steps.push(CalculationStep::new(
                StepCategory::Earnings,
                format!("{label} ({days_label})"),
                prorated,
                prorated_formula(monthly, factor, prorated),
            ));
        }
    }

    let gross_amount =
        round_money(basic_pay + dearness_allowance + house_rent_allowance + other_allowances);
    audit_steps.push(CalculationStep::new(
        StepCategory::Summary,
        "Gross Salary",
        gross_amount,
        format!(
            "{} + {} + {} + {} = {}",
            fmt_money(basic_pay),
            fmt_money(dearness_allowance),
            fmt_money(house_rent_allowance),
            fmt_money(other_allowances),
            fmt_money(gross_amount)
        ),
    ));

    EarningsResult {
        proration_factor: factor,
        basic_pay,
        dearness_allowance,
        house_rent_allowance,
        other_allowances,
        gross_amount,
        audit_steps,
    }
}

fn prorated_formula(monthly: Decimal, factor: Decimal, prorated: Decimal) -> String {
    format!(
        "{} × {} = {}",
        fmt_money(monthly),
        fmt_factor(factor),
        fmt_money(prorated)
    )
}
