//! Rule set well-formedness checks.
//!
//! Every calculator and validator constructor runs [`validate_rule_set`]
//! so that malformed configuration never reaches financial output.

use rust_decimal::Decimal;

use crate::calculation::Slab;
use crate::error::{EngineError, EngineResult};

use super::types::StatutoryRuleSet;

/// Validates a statutory rule set.
///
/// Fails when:
/// - the PF block is absent or has a negative rate
/// - the ESI block is absent or has a negative rate
/// - a present PT or TDS block has no slabs, or slabs that are not strictly
///   ascending by minimum
/// - a TDS slab rate lies outside `[0, 100]`
/// - the gratuity block has a non-positive month divisor or negative parameters
///
/// # Example
///
/// ```
/// use payroll_engine::config::{validate_rule_set, StatutoryRuleSet};
///
/// let mut rules = StatutoryRuleSet::india_default();
/// assert!(validate_rule_set(&rules).is_ok());
///
/// rules.provident_fund = None;
/// assert!(validate_rule_set(&rules).is_err());
/// ```
pub fn validate_rule_set(rules: &StatutoryRuleSet) -> EngineResult<()> {
    let pf = rules
        .provident_fund
        .as_ref()
        .ok_or_else(|| invalid("PF rules not configured"))?;
    if pf.employee_rate < Decimal::ZERO || pf.employer_rate < Decimal::ZERO {
        return Err(invalid("PF rates cannot be negative"));
    }

    let esi = rules
        .state_insurance
        .as_ref()
        .ok_or_else(|| invalid("ESI rules not configured"))?;
    if esi.employee_rate < Decimal::ZERO || esi.employer_rate < Decimal::ZERO {
        return Err(invalid("ESI rates cannot be negative"));
    }

    if let Some(pt) = &rules.professional_tax {
        check_slabs("PT", &pt.slabs)?;
    }

    if let Some(tds) = &rules.withholding_tax {
        check_slabs("TDS", &tds.slabs)?;

        let hundred = Decimal::ONE_HUNDRED;
        if let Some(slab) = tds
            .slabs
            .iter()
            .find(|slab| slab.rate < Decimal::ZERO || slab.rate > hundred)
        {
            return Err(invalid(format!(
                "TDS rate must be between 0-100, got {:.2}",
                slab.rate
            )));
        }
    }

    let gratuity = &rules.gratuity;
    if gratuity.days_per_month <= Decimal::ZERO {
        return Err(invalid("Gratuity days per month must be greater than 0"));
    }
    if gratuity.days_per_year < Decimal::ZERO || gratuity.eligibility_months < 0 {
        return Err(invalid("Gratuity parameters cannot be negative"));
    }

    Ok(())
}

fn check_slabs<S: Slab>(label: &str, slabs: &[S]) -> EngineResult<()> {
    if slabs.is_empty() {
        return Err(invalid(format!("{} slabs not configured", label)));
    }

    if slabs.windows(2).any(|pair| pair[0].min() >= pair[1].min()) {
        return Err(invalid(format!("{} slabs must be in ascending order", label)));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidRuleSet {
        message: message.into(),
    }
}
