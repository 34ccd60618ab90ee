//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory stages of a payroll computation
//! (earnings proration, Provident Fund, ESI, professional tax, withholding
//! tax, recoveries and net pay), the calculator that runs them in order, and
//! the gratuity calculator.

mod earnings;
mod gratuity;
mod net_pay;
mod other_deductions;
mod payroll;
mod professional_tax;
mod provident_fund;
mod rounding;
mod slab;
mod state_insurance;
mod withholding_tax;

pub use earnings::{EarningsResult, calculate_earnings};
pub use gratuity::{DAYS_PER_SERVICE_YEAR, GratuityCalculator, ServicePeriod};
pub use net_pay::{DeductionBreakdown, NetPayResult, calculate_net_pay};
pub use other_deductions::{OtherDeductionsResult, apply_other_deductions};
pub use payroll::{PayrollCalculator, calculate_payroll};
pub use professional_tax::{ProfessionalTaxResult, calculate_professional_tax};
pub use provident_fund::{ProvidentFundResult, calculate_provident_fund};
pub use rounding::{percent_of, proration_factor, round_money};
pub use slab::{Slab, find_slab};
pub use state_insurance::{StateInsuranceResult, calculate_state_insurance};
pub use withholding_tax::{WithholdingTaxResult, calculate_withholding_tax};
