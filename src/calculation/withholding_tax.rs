//! Withholding tax (TDS) calculation.

use rust_decimal::Decimal;

use crate::config::WithholdingTaxRules;
use crate::models::{CalculationStep, StepCategory};

use super::rounding::{fmt_money, percent_of, round_money};
use super::slab::find_slab;

/// The result of the withholding tax stage.
#[derive(Debug, Clone, Default)]
pub struct WithholdingTaxResult {
    /// Gross less employee PF, employee ESI and professional tax.
    pub taxable_base: Decimal,
    /// Rate of the matched slab, if any.
    pub rate: Option<Decimal>,
    /// Tax withheld for the period.
    pub amount: Decimal,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Calculates TDS on the taxable base.
///
/// The matched slab's rate applies to the whole base: this is a flat rate per
/// bracket, not a marginal computation.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::StatutoryRuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = StatutoryRuleSet::india_default();
/// let result = calculate_withholding_tax(
///     Decimal::from(80000),
///     Decimal::from(1800),
///     Decimal::ZERO,
///     Decimal::from(200),
///     rules.withholding_tax.as_ref(),
/// );
///
/// // (80000 - 1800 - 0 - 200) × 5% = 3900
/// assert_eq!(result.amount, Decimal::from(3900));
/// ```
pub fn calculate_withholding_tax(
    gross_amount: Decimal,
    pf_employee: Decimal,
    esi_employee: Decimal,
    professional_tax: Decimal,
    rules: Option<&WithholdingTaxRules>,
) -> WithholdingTaxResult {
    let taxable_base = round_money(gross_amount - pf_employee - esi_employee - professional_tax);

    let Some(slab) = rules.and_then(|rules| find_slab(&rules.slabs, taxable_base)) else {
        return WithholdingTaxResult {
            taxable_base,
            ..WithholdingTaxResult::default()
        };
    };

    let amount = percent_of(taxable_base, slab.rate);
    let audit_steps = vec![CalculationStep::new(
        StepCategory::Tds,
        "Tax Deducted at Source",
        amount,
        format!(
            "({} - {} - {} - {}) × {}% = {}",
            fmt_money(gross_amount),
            fmt_money(pf_employee),
            fmt_money(esi_employee),
            fmt_money(professional_tax),
            fmt_money(slab.rate),
            fmt_money(amount)
        ),
    )];

    WithholdingTaxResult {
        taxable_base,
        rate: Some(slab.rate),
        amount,
        audit_steps,
    }
}
