//! Total deductions and net pay.

use rust_decimal::Decimal;

use crate::models::{CalculationStep, StepCategory};

use super::rounding::{fmt_money, round_money};

/// Every amount taken from gross pay, by source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeductionBreakdown {
    /// Employee PF contribution.
    pub pf_employee: Decimal,
    /// Employee ESI contribution.
    pub esi_employee: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Withholding tax.
    pub tds: Decimal,
    /// Advance recovery.
    pub advance_recovery: Decimal,
    /// Loan recovery.
    pub loan_recovery: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
}

impl DeductionBreakdown {
    /// Sum of all deductions, rounded.
    pub fn total(&self) -> Decimal {
        round_money(
            self.pf_employee
                + self.esi_employee
                + self.professional_tax
                + self.tds
                + self.advance_recovery
                + self.loan_recovery
                + self.other_deductions,
        )
    }
}

/// The result of the net pay stage.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Gross less deductions, floored at zero.
    pub net_pay: Decimal,
    /// Amount by which deductions exceeded gross. Not carried forward.
    pub shortfall: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Computes total deductions and net pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{DeductionBreakdown, calculate_net_pay};
/// use rust_decimal::Decimal;
///
/// let deductions = DeductionBreakdown {
///     pf_employee: Decimal::from(1800),
///     professional_tax: Decimal::from(200),
///     ..Default::default()
/// };
///
/// let result = calculate_net_pay(Decimal::from(20000), &deductions);
/// assert_eq!(result.total_deductions, Decimal::from(2000));
/// assert_eq!(result.net_pay, Decimal::from(18000));
/// ```
pub fn calculate_net_pay(gross_amount: Decimal, deductions: &DeductionBreakdown) -> NetPayResult {
    let total_deductions = deductions.total();
    let difference = round_money(gross_amount - total_deductions);
    let net_pay = difference.max(Decimal::ZERO);
    let shortfall = (-difference).max(Decimal::ZERO);

    let audit_steps = vec![
        CalculationStep::new(
            StepCategory::Summary,
            "Total Deductions",
            total_deductions,
            format!(
                "{} + {} + {} + {} + {} + {} + {} = {}",
                fmt_money(deductions.pf_employee),
                fmt_money(deductions.esi_employee),
                fmt_money(deductions.professional_tax),
                fmt_money(deductions.tds),
                fmt_money(deductions.advance_recovery),
                fmt_money(deductions.loan_recovery),
                fmt_money(deductions.other_deductions),
                fmt_money(total_deductions)
            ),
        ),
        CalculationStep::new(
            StepCategory::Summary,
            "Net Pay",
            net_pay,
            format!(
                "max(0, {} - {}) = {}",
                fmt_money(gross_amount),
                fmt_money(total_deductions),
                fmt_money(net_pay)
            ),
        ),
    ];

    NetPayResult {
        total_deductions,
        net_pay,
        shortfall,
        audit_steps,
    }
}
