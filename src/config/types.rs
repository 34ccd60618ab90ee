//! Statutory rule set types.
//!
//! This module contains the strongly-typed parameter bundle that drives every
//! calculator. Each statutory block is independently optional: a stage whose
//! block is `None` is skipped rather than computed from zeroed data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provident Fund parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidentFundRules {
    /// Employee contribution, as a percentage of the PF wage.
    pub employee_rate: Decimal,
    /// Employer contribution, as a percentage of the PF wage.
    pub employer_rate: Decimal,
    /// Monthly wage ceiling. Zero disables the ceiling.
    pub wage_ceiling: Decimal,
}

/// Employee State Insurance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInsuranceRules {
    /// Employee contribution, as a percentage of the ESI wage.
    pub employee_rate: Decimal,
    /// Employer contribution, as a percentage of the ESI wage.
    pub employer_rate: Decimal,
    /// Monthly wage ceiling. Zero disables the ceiling.
    pub wage_ceiling: Decimal,
    /// Gross salary above which ESI does not apply. Zero means always applicable.
    #[serde(default)]
    pub salary_threshold: Decimal,
}

/// A gross-salary range mapped to a flat professional tax amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxSlab {
    /// Lower bound (inclusive).
    pub min: Decimal,
    /// Upper bound (inclusive). `None` means no upper bound.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Flat monthly tax for this slab.
    pub amount: Decimal,
}

/// Professional tax parameters (state-wise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxRules {
    /// Slabs sorted ascending by `min`.
    pub slabs: Vec<ProfessionalTaxSlab>,
}

/// A taxable-income range mapped to a withholding percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTaxSlab {
    /// Lower bound (inclusive).
    pub min: Decimal,
    /// Upper bound (inclusive). `None` means no upper bound.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Percentage applied to the whole taxable base.
    pub rate: Decimal,
}

/// Withholding tax (TDS) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingTaxRules {
    /// Slabs sorted ascending by `min`.
    pub slabs: Vec<WithholdingTaxSlab>,
}

/// Gratuity parameters.
///
/// Omitted blocks deserialize to the statutory values (15 days per year,
/// 60 months of service, 30-day month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityRules {
    /// Days of basic salary earned per year of service.
    pub days_per_year: Decimal,
    /// Minimum months of service before gratuity is earned.
    pub eligibility_months: i32,
    /// Divisor turning a monthly basic into a daily basic.
    pub days_per_month: Decimal,
}

impl Default for GratuityRules {
    fn default() -> Self {
        Self {
            days_per_year: Decimal::from(15),
            eligibility_months: 60,
            days_per_month: Decimal::from(30),
        }
    }
}

/// The complete statutory parameter bundle for one jurisdiction.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StatutoryRuleSet;
///
/// let rules = StatutoryRuleSet::india_default();
/// assert!(rules.provident_fund.is_some());
/// assert_eq!(rules.gratuity.eligibility_months, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatutoryRuleSet {
    /// Provident Fund block.
    #[serde(default)]
    pub provident_fund: Option<ProvidentFundRules>,
    /// Employee State Insurance block.
    #[serde(default)]
    pub state_insurance: Option<StateInsuranceRules>,
    /// Professional tax block.
    #[serde(default)]
    pub professional_tax: Option<ProfessionalTaxRules>,
    /// Withholding tax block.
    #[serde(default)]
    pub withholding_tax: Option<WithholdingTaxRules>,
    /// Gratuity parameters.
    #[serde(default)]
    pub gratuity: GratuityRules,
}
