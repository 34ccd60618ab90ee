//! Fixed recoveries carried over from the payroll input.

use rust_decimal::Decimal;

use crate::models::{CalculationStep, PayrollInput, StepCategory};

use super::rounding::fmt_money;

/// The result of the other-deductions stage.
#[derive(Debug, Clone, Default)]
pub struct OtherDeductionsResult {
    /// Salary advance recovered.
    pub advance_recovery: Decimal,
    /// Loan instalment recovered.
    pub loan_recovery: Decimal,
    /// Other approved deductions.
    pub other_deductions: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Copies the input's recoveries verbatim. Each positive amount gets a step.
pub fn apply_other_deductions(input: &PayrollInput) -> OtherDeductionsResult {
    let entries = [
        ("Advance Recovery", input.advance_recovery),
        ("Loan Recovery", input.loan_recovery),
        ("Other Deductions", input.other_deductions),
    ];

    let audit_steps = entries
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(label, amount)| {
            CalculationStep::new(StepCategory::Deductions, label, amount, fmt_money(amount))
        })
        .collect();

    OtherDeductionsResult {
        advance_recovery: input.advance_recovery,
        loan_recovery: input.loan_recovery,
        other_deductions: input.other_deductions,
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

    #[test]
    fn test_positive_amounts_emit_steps() {
        let mut input = PayrollInput::full_month(30);
        input.advance_recovery = dec("1000");
        input.other_deductions = dec("250.50");

        let result = apply_other_deductions(&input);

        assert_eq!(result.advance_recovery, dec("1000"));
        assert_eq!(result.loan_recovery, Decimal::ZERO);
        assert_eq!(result.other_deductions, dec("250.50"));
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].description, "Advance Recovery");
        assert_eq!(result.audit_steps[1].formula, "250.50");
    }

    #[test]
    fn test_no_recoveries_emit_nothing() {
        let result = apply_other_deductions(&PayrollInput::full_month(30));
        assert!(result.audit_steps.is_empty());
    }
}
