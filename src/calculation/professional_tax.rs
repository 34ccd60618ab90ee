//! Professional tax calculation.
//!
//! Professional tax is a flat monthly amount taken from the first slab whose
//! inclusive range contains gross pay.

use rust_decimal::Decimal;

use crate::config::{ProfessionalTaxRules, ProfessionalTaxSlab};
use crate::models::{CalculationStep, StepCategory};

use super::rounding::fmt_money;
use super::slab::{Slab, find_slab};

/// The result of the professional tax stage.
#[derive(Debug, Clone, Default)]
pub struct ProfessionalTaxResult {
    /// Tax due for the period.
    pub amount: Decimal,
    /// The slab that matched, if any.
    pub matched_slab: Option<ProfessionalTaxSlab>,
    /// Audit steps emitted by this stage.
    pub audit_steps: Vec<CalculationStep>,
}

/// Looks up professional tax for a gross amount.
///
/// Returns zero with no audit step when the block is absent, has no slabs,
/// or no slab contains the gross amount.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_professional_tax;
/// use payroll_engine::config::StatutoryRuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = StatutoryRuleSet::india_default();
/// let result = calculate_professional_tax(Decimal::from(18000), rules.professional_tax.as_ref());
///
/// assert_eq!(result.amount, Decimal::from(150));
/// ```
pub fn calculate_professional_tax(
    gross_amount: Decimal,
    rules: Option<&ProfessionalTaxRules>,
) -> ProfessionalTaxResult {
    let Some(slab) = rules.and_then(|rules| find_slab(&rules.slabs, gross_amount)) else {
        return ProfessionalTaxResult::default();
    };

    let amount = slab.amount;
    let audit_steps = vec![CalculationStep::new(
        StepCategory::Pt,
        "Professional Tax",
        amount,
        format!(
            "Gross {} in slab {} = {}",
            fmt_money(gross_amount),
            slab.range_label(),
            fmt_money(amount)
        ),
    )];

    ProfessionalTaxResult {
        amount,
        matched_slab: Some(slab.clone()),
        audit_steps,
    }
}
