//! Salary structure model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly salary components before proration.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryStructure;
/// use rust_decimal::Decimal;
///
/// let salary = SalaryStructure::basic_only(Decimal::from(20000));
/// assert_eq!(salary.monthly_total(), Decimal::from(20000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Identifier of the structure in the owning system, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// Monthly basic salary. Must be greater than zero.
    pub monthly_basic: Decimal,
    /// Monthly dearness allowance.
    #[serde(default)]
    pub monthly_da: Decimal,
    /// Monthly house rent allowance.
    #[serde(default)]
    pub monthly_hra: Decimal,
    /// Other monthly allowances.
    #[serde(default)]
    pub monthly_allowance: Decimal,
}

impl SalaryStructure {
    /// Creates a structure with only a basic component.
    pub fn basic_only(monthly_basic: Decimal) -> Self {
        Self {
            id: None,
            monthly_basic,
            monthly_da: Decimal::ZERO,
            monthly_hra: Decimal::ZERO,
            monthly_allowance: Decimal::ZERO,
        }
    }

    /// Sum of all monthly components.
    pub fn monthly_total(&self) -> Decimal {
        self.monthly_basic + self.monthly_da + self.monthly_hra + self.monthly_allowance
    }
}
