//! Provident Fund contribution calculation.

use rust_decimal::Decimal;

use crate::config::ProvidentFundRules;
use crate::models::{CalculationStep, StepCategory};

use super::rounding::{fmt_money, percent_of};

/// The result of the Provident Fund stage.
#[derive(Debug, Clone, Default)]
pub struct ProvidentFundResult {
    /// Basic + DA, capped at the wage ceiling.
    pub wage_base: Decimal,
    /// Whether the ceiling reduced the wage base.
    pub ceiling_applied: bool,
    /// Employee contribution.
    pub employee_contribution: Decimal,
    /// Employer contribution.
    pub employer_contribution: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Calculates employee and employer PF contributions.
///
/// The wage base is prorated basic plus DA, capped at `wage_ceiling` when the
/// ceiling is positive and exceeded. Each side is `base × rate / 100`, rounded
/// independently. With no PF block configured the stage contributes nothing.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_provident_fund;
/// use payroll_engine::config::StatutoryRuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = StatutoryRuleSet::india_default();
/// let result = calculate_provident_fund(
///     Decimal::from(20000),
///     Decimal::ZERO,
///     rules.provident_fund.as_ref(),
/// );
///
/// // 20000 is capped to the 15000 ceiling; 12% of 15000 = 1800
/// assert_eq!(result.employee_contribution, Decimal::from(1800));
/// assert_eq!(result.employer_contribution, Decimal::from(1800));
/// ```
pub fn calculate_provident_fund(
    basic_pay: Decimal,
    dearness_allowance: Decimal,
    rules: Option<&ProvidentFundRules>,
) -> ProvidentFundResult {
    let Some(rules) = rules else {
        return ProvidentFundResult::default();
    };

    let uncapped = basic_pay + dearness_allowance;
    let ceiling_applied = rules.wage_ceiling > Decimal::ZERO && uncapped > rules.wage_ceiling;
    let wage_base = if ceiling_applied {
        rules.wage_ceiling
    } else {
        uncapped
    };

    let employee_contribution = percent_of(wage_base, rules.employee_rate);
    let employer_contribution = percent_of(wage_base, rules.employer_rate);

    let base_label = if ceiling_applied {
        format!("min({}, {})", fmt_money(uncapped), fmt_money(rules.wage_ceiling))
    } else {
        fmt_money(wage_base)
    };

    let audit_steps = vec![
        CalculationStep::new(
            StepCategory::Pf,
            "PF - Employee Contribution",
            employee_contribution,
            format!(
                "{} × {}% = {}",
                base_label,
                fmt_money(rules.employee_rate),
                fmt_money(employee_contribution)
            ),
        ),
        CalculationStep::new(
            StepCategory::Pf,
            "PF - Employer Contribution",
            employer_contribution,
            format!(
                "{} × {}% = {}",
                base_label,
                fmt_money(rules.employer_rate),
                fmt_money(employer_contribution)
            ),
        ),
    ];

    ProvidentFundResult {
        wage_base,
        ceiling_applied,
        employee_contribution,
        employer_contribution,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rules() -> ProvidentFundRules {
        ProvidentFundRules {
            employee_rate: dec("12"),
            employer_rate: dec("12"),
            wage_ceiling: dec("15000"),
        }
    }

    #[test]
    fn test_wage_above_ceiling_is_capped() {
        let result = calculate_provident_fund(dec("20000"), Decimal::ZERO, Some(&rules()));

        assert!(result.ceiling_applied);
        assert_eq!(result.wage_base, dec("15000"));
        assert_eq!(result.employee_contribution, dec("1800.00"));
        assert_eq!(result.employer_contribution, dec("1800.00"));
        assert_eq!(
            result.audit_steps[0].formula,
            "min(20000.00, 15000.00) × 12.00% = 1800.00"
        );
    }

    #[test]
    fn test_wage_below_ceiling_uses_basic_plus_da() {
        let result = calculate_provident_fund(dec("10000"), dec("2000"), Some(&rules()));

        assert!(!result.ceiling_applied);
        assert_eq!(result.wage_base, dec("12000"));
        assert_eq!(result.employee_contribution, dec("1440.00"));
        assert_eq!(result.audit_steps[1].formula, "12000.00 × 12.00% = 1440.00");
    }

    #[test]
    fn test_zero_ceiling_means_uncapped() {
        let mut rules = rules();
        rules.wage_ceiling = Decimal::ZERO;

        let result = calculate_provident_fund(dec("50000"), Decimal::ZERO, Some(&rules));

        assert!(!result.ceiling_applied);
        assert_eq!(result.employee_contribution, dec("6000.00"));
    }

    #[test]
    fn test_sides_round_independently() {
        let rules = ProvidentFundRules {
            employee_rate: dec("12"),
            employer_rate: dec("3.67"),
            wage_ceiling: Decimal::ZERO,
        };

        let result = calculate_provident_fund(dec("13333.33"), Decimal::ZERO, Some(&rules));

        assert_eq!(result.employee_contribution, dec("1600.00"));
        // 13333.33 × 3.67% = 489.333211 → 489.33
        assert_eq!(result.employer_contribution, dec("489.33"));
    }

    #[test]
    fn test_absent_block_contributes_nothing() {
        let result = calculate_provident_fund(dec("20000"), Decimal::ZERO, None);

        assert_eq!(result.employee_contribution, Decimal::ZERO);
        assert_eq!(result.employer_contribution, Decimal::ZERO);
        assert!(result.audit_steps.is_empty());
    }

    #[test]
    fn test_zero_wage_still_emits_both_steps() {
        let result = calculate_provident_fund(Decimal::ZERO, Decimal::ZERO, Some(&rules()));

        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.employee_contribution, Decimal::ZERO);
    }
}
