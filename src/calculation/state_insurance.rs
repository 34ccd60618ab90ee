//! Employee State Insurance (ESI) contribution calculation.

use rust_decimal::Decimal;

use crate::config::StateInsuranceRules;
use crate::models::{CalculationStep, StepCategory};

use super::rounding::{fmt_money, percent_of};

/// The result of the ESI stage.
#[derive(Debug, Clone, Default)]
pub struct StateInsuranceResult {
    /// Whether ESI applied to this gross amount.
    pub applicable: bool,
    /// Gross, capped at the wage ceiling. Zero when not applicable.
    pub wage_base: Decimal,
    /// Employee contribution.
    pub employee_contribution: Decimal,
    /// Employer contribution.
    pub employer_contribution: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Calculates employee and employer ESI contributions on gross pay.
///
/// ESI does not apply when a positive `salary_threshold` is configured and
/// gross exceeds it. Otherwise the base is gross, capped at `wage_ceiling`
/// when the ceiling is positive and exceeded.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_state_insurance;
/// use payroll_engine::config::StatutoryRuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = StatutoryRuleSet::india_default();
/// let result = calculate_state_insurance(Decimal::from(25000), rules.state_insurance.as_ref());
///
/// assert_eq!(result.employee_contribution, Decimal::from_str("157.50").unwrap());
/// assert_eq!(result.employer_contribution, Decimal::from_str("682.50").unwrap());
/// ```
pub fn calculate_state_insurance(
    gross_amount: Decimal,
    rules: Option<&StateInsuranceRules>,
) -> StateInsuranceResult {
    let Some(rules) = rules else {
        return StateInsuranceResult::default();
    };

    if rules.salary_threshold > Decimal::ZERO && gross_amount > rules.salary_threshold {
        return StateInsuranceResult::default();
    }

    let capped = rules.wage_ceiling > Decimal::ZERO && gross_amount > rules.wage_ceiling;
    let wage_base = if capped {
        rules.wage_ceiling
    } else {
        gross_amount
    };

    let employee_contribution = percent_of(wage_base, rules.employee_rate);
    let employer_contribution = percent_of(wage_base, rules.employer_rate);

    let audit_steps = vec![
        CalculationStep::new(
            StepCategory::Esi,
            "ESI - Employee Contribution",
            employee_contribution,
            format!(
                "{} × {}% = {}",
                fmt_money(wage_base),
                fmt_money(rules.employee_rate),
                fmt_money(employee_contribution)
            ),
        ),
        CalculationStep::new(
            StepCategory::Esi,
            "ESI - Employer Contribution",
            employer_contribution,
            format!(
                "{} × {}% = {}",
                fmt_money(wage_base),
                fmt_money(rules.employer_rate),
                fmt_money(employer_contribution)
            ),
        ),
    ];

    StateInsuranceResult {
        applicable: true,
        wage_base,
        employee_contribution,
        employer_contribution,
        audit_steps,
    }
}
