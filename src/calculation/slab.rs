//! Slab lookup shared by professional tax and withholding tax.

use rust_decimal::Decimal;

use crate::config::{ProfessionalTaxSlab, WithholdingTaxSlab};

/// A range `[min, max]`, inclusive on both ends, with an optional upper bound.
pub trait Slab {
    /// Lower bound (inclusive).
    fn min(&self) -> Decimal;

    /// Upper bound (inclusive). `None` means unbounded.
    fn max(&self) -> Option<Decimal>;

    /// Returns true if `value` lies within the slab.
    fn contains(&self, value: Decimal) -> bool {
        value >= self.min() && self.max().is_none_or(|max| value <= max)
    }

    /// Human-readable range, e.g. "10001 - 20000" or "20001 and above".
    fn range_label(&self) -> String {
        match self.max() {
            Some(max) => format!("{} - {}", self.min().normalize(), max.normalize()),
            None => format!("{} and above", self.min().normalize()),
        }
    }
}

impl Slab for ProfessionalTaxSlab {
    fn min(&self) -> Decimal {
        self.min
    }

    fn max(&self) -> Option<Decimal> {
        self.max
    }
}

impl Slab for WithholdingTaxSlab {
    fn min(&self) -> Decimal {
        self.min
    }

    fn max(&self) -> Option<Decimal> {
        self.max
    }
}

/// Returns the first slab, in list order, containing `value`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::find_slab;
/// use payroll_engine::config::StatutoryRuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = StatutoryRuleSet::india_default();
/// let slabs = &rules.professional_tax.unwrap().slabs;
///
/// let slab = find_slab(slabs, Decimal::from(20000)).unwrap();
/// assert_eq!(slab.amount, Decimal::from(150));
/// ```
pub fn find_slab<S: Slab>(slabs: &[S], value: Decimal) -> Option<&S> {
    slabs.iter().find(|slab| slab.contains(value))
}
