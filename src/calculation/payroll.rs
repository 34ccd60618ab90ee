//! The payroll calculator.
//!
//! Runs the statutory stages in a fixed order and assembles a
//! [`CalculationResult`]. Each stage returns its own audit steps, which are
//! appended to the trail in stage order.

use std::sync::Arc;

use tracing::debug;

use crate::config::{StatutoryRuleSet, validate_rule_set};
use crate::error::EngineResult;
use crate::models::{CalculationResult, Employee, PayrollInput, SalaryStructure};

use super::earnings::calculate_earnings;
use super::net_pay::{DeductionBreakdown, calculate_net_pay};
use super::other_deductions::apply_other_deductions;
use super::professional_tax::calculate_professional_tax;
use super::provident_fund::calculate_provident_fund;
use super::rounding::round_money;
use super::state_insurance::calculate_state_insurance;
use super::withholding_tax::calculate_withholding_tax;

/// A payroll calculator bound to a validated rule set.
///
/// The rule set is shared read-only, so one calculator can be used from many
/// threads at once.
#[derive(Debug, Clone)]
pub struct PayrollCalculator {
    rules: Arc<StatutoryRuleSet>,
}

impl PayrollCalculator {
    /// Validates the rule set and binds a calculator to it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidRuleSet` if the rule set is unusable.
    pub fn new(rules: StatutoryRuleSet) -> EngineResult<Self> {
        Self::from_shared(Arc::new(rules))
    }

    /// Same as [`PayrollCalculator::new`] for a rule set that is already shared.
    pub fn from_shared(rules: Arc<StatutoryRuleSet>) -> EngineResult<Self> {
        validate_rule_set(&rules)?;
        Ok(Self { rules })
    }

    /// The rule set this calculator applies.
    pub fn rules(&self) -> &StatutoryRuleSet {
        &self.rules
    }

    /// Computes one employee's payroll for one period.
    pub fn compute(
        &self,
        employee: &Employee,
        salary: &SalaryStructure,
        input: &PayrollInput,
    ) -> CalculationResult {
        calculate_payroll(employee, salary, input, &self.rules)
    }
}

/// Computes one employee's payroll against an explicit rule set.
///
/// Stages run strictly in this order: earnings, Provident Fund, ESI,
/// professional tax, withholding tax, other deductions, net pay. The
/// computation is pure and never fails; input checks happen before a
/// calculation is started.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::StatutoryRuleSet;
/// use payroll_engine::models::{Employee, PayrollInput, SalaryStructure};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
/// let salary = SalaryStructure::basic_only(Decimal::from(20000));
/// let rules = StatutoryRuleSet::india_default();
///
/// let result = calculate_payroll(&employee, &salary, &PayrollInput::full_month(30), &rules);
///
/// assert_eq!(result.gross_amount, Decimal::from(20000));
/// assert_eq!(result.pf_employee, Decimal::from(1800));
/// assert_eq!(result.net_pay, result.gross_amount - result.total_deductions);
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    salary: &SalaryStructure,
    input: &PayrollInput,
    rules: &StatutoryRuleSet,
) -> CalculationResult {
    let earnings = calculate_earnings(salary, input);
    let gross = earnings.gross_amount;

    let pf = calculate_provident_fund(
        earnings.basic_pay,
        earnings.dearness_allowance,
        rules.provident_fund.as_ref(),
    );
    let esi = calculate_state_insurance(gross, rules.state_insurance.as_ref());
    let pt = calculate_professional_tax(gross, rules.professional_tax.as_ref());
    let tds = calculate_withholding_tax(
        gross,
        pf.employee_contribution,
        esi.employee_contribution,
        pt.amount,
        rules.withholding_tax.as_ref(),
    );
    let recoveries = apply_other_deductions(input);

    let deductions = DeductionBreakdown {
        pf_employee: pf.employee_contribution,
        esi_employee: esi.employee_contribution,
        professional_tax: pt.amount,
        tds: tds.amount,
        advance_recovery: recoveries.advance_recovery,
        loan_recovery: recoveries.loan_recovery,
        other_deductions: recoveries.other_deductions,
    };
    let net = calculate_net_pay(gross, &deductions);

    let mut calculations = earnings.audit_steps;
    calculations.extend(pf.audit_steps);
    calculations.extend(esi.audit_steps);
    calculations.extend(pt.audit_steps);
    calculations.extend(tds.audit_steps);
    calculations.extend(recoveries.audit_steps);
    calculations.extend(net.audit_steps);

    debug!(
        employee_id = %employee.id,
        gross = %gross,
        total_deductions = %net.total_deductions,
        net_pay = %net.net_pay,
        "Computed payroll"
    );

    CalculationResult {
        proration_factor: earnings.proration_factor,
        basic_pay: earnings.basic_pay,
        dearness_allowance: earnings.dearness_allowance,
        house_rent_allowance: earnings.house_rent_allowance,
        other_allowances: earnings.other_allowances,
        gross_amount: gross,
        pf_employee: pf.employee_contribution,
        pf_employer: pf.employer_contribution,
        esi_employee: esi.employee_contribution,
        esi_employer: esi.employer_contribution,
        professional_tax: pt.amount,
        tds: tds.amount,
        advance_recovery: recoveries.advance_recovery,
        loan_recovery: recoveries.loan_recovery,
        other_deductions: recoveries.other_deductions,
        total_employee_contributions: round_money(
            pf.employee_contribution + esi.employee_contribution + pt.amount,
        ),
        total_employer_contributions: round_money(
            pf.employer_contribution + esi.employer_contribution,
        ),
        total_deductions: net.total_deductions,
        net_pay: net.net_pay,
        calculations,
    }
}
