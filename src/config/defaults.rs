//! Default India statutory rules.

use rust_decimal::Decimal;

use super::types::{
    GratuityRules, ProfessionalTaxRules, ProfessionalTaxSlab, ProvidentFundRules,
    StateInsuranceRules, StatutoryRuleSet, WithholdingTaxRules, WithholdingTaxSlab,
};

/// Jurisdiction code used when a caller does not name one (Maharashtra).
pub const DEFAULT_JURISDICTION: &str = "MH";

impl StatutoryRuleSet {
    /// Builds the default India rule set.
    ///
    /// PF 12% + 12% on a 15,000 ceiling, ESI 0.75% + 3.25% on a 21,000
    /// ceiling, Maharashtra professional tax slabs and simplified monthly TDS
    /// slabs. A fresh value is built on every call so fixtures can modify
    /// their own copy.
    pub fn india_default() -> Self {
        Self {
            provident_fund: Some(ProvidentFundRules {
                employee_rate: Decimal::from(12),
                employer_rate: Decimal::from(12),
                wage_ceiling: Decimal::from(15000),
            }),
            state_insurance: Some(StateInsuranceRules {
                employee_rate: Decimal::new(75, 2),
                employer_rate: Decimal::new(325, 2),
                wage_ceiling: Decimal::from(21000),
                salary_threshold: Decimal::ZERO,
            }),
            professional_tax: Some(ProfessionalTaxRules {
                slabs: vec![
                    pt_slab(0, Some(10000), 0),
                    pt_slab(10001, Some(20000), 150),
                    pt_slab(20001, None, 200),
                ],
            }),
            withholding_tax: Some(WithholdingTaxRules {
                slabs: vec![
                    tds_slab(0, Some(50000), 0),
                    tds_slab(50001, Some(100000), 5),
                    tds_slab(100001, Some(250000), 10),
                    tds_slab(250001, None, 15),
                ],
            }),
            gratuity: GratuityRules::default(),
        }
    }
}

fn pt_slab(min: i64, max: Option<i64>, amount: i64) -> ProfessionalTaxSlab {
    ProfessionalTaxSlab {
        min: Decimal::from(min),
        max: max.map(Decimal::from),
        amount: Decimal::from(amount),
    }
}

fn tds_slab(min: i64, max: Option<i64>, rate: i64) -> WithholdingTaxSlab {
    WithholdingTaxSlab {
        min: Decimal::from(min),
        max: max.map(Decimal::from),
        rate: Decimal::from(rate),
    }
}
