//! Gratuity accrual and payout calculation.
//!
//! Gratuity accrues at `days_per_year` days of basic salary for every year of
//! service once the minimum service period is met. Results are recomputed from
//! the current tenure on every call.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::{GratuityRules, StatutoryRuleSet, validate_rule_set};
use crate::error::EngineResult;
use crate::models::{
    CalculationStep, Employee, ExitReason, GratuityResult, GratuitySummary, StepCategory,
};

use super::rounding::{fmt_factor, fmt_money, round_money};

/// Average days per year used to convert days of service into years.
pub const DAYS_PER_SERVICE_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// Resignation before this many years forfeits gratuity.
const RESIGNATION_MIN_YEARS: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Resignation from this many years onwards pays the full amount.
const RESIGNATION_FULL_YEARS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Completed service between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePeriod {
    /// Calendar days served. Zero if joining is after `as_of`.
    pub days: i64,
    /// Years served, rounded to 2 decimals.
    pub years: Decimal,
    /// Years served, unrounded.
    pub exact_years: Decimal,
    /// Whole months served, from the unrounded years.
    pub months: i32,
}

impl ServicePeriod {
    /// Measures service from `date_of_joining` up to `as_of`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::ServicePeriod;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let joined = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// let as_of = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    ///
    /// let service = ServicePeriod::between(joined, as_of);
    /// assert_eq!(service.days, 731);
    /// assert_eq!(service.years, Decimal::new(200, 2));
    /// assert_eq!(service.months, 24);
    /// ```
    pub fn between(date_of_joining: NaiveDate, as_of: NaiveDate) -> Self {
        let days = (as_of - date_of_joining).num_days().max(0);
        let exact_years = Decimal::from(days) / DAYS_PER_SERVICE_YEAR;
        let months = (exact_years * Decimal::from(12))
            .floor()
            .to_i32()
            .unwrap_or(i32::MAX);

        Self {
            days,
            years: round_money(exact_years),
            exact_years,
            months,
        }
    }
}

/// Computes gratuity accruals and payouts under one set of gratuity rules.
#[derive(Debug, Clone)]
pub struct GratuityCalculator {
    rules: GratuityRules,
}

impl GratuityCalculator {
    /// Validates the rule set and binds a calculator to its gratuity rules.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidRuleSet` if the rule set is unusable.
    pub fn new(rules: &StatutoryRuleSet) -> EngineResult<Self> {
        validate_rule_set(rules)?;
        Ok(Self {
            rules: rules.gratuity.clone(),
        })
    }

    /// The gratuity rules this calculator applies.
    pub fn rules(&self) -> &GratuityRules {
        &self.rules
    }

    /// Gratuity accrued up to `as_of`, without a payout.
    pub fn accrue(
        &self,
        employee: &Employee,
        monthly_basic: Decimal,
        as_of: NaiveDate,
    ) -> GratuityResult {
        let service = ServicePeriod::between(employee.date_of_joining, as_of);

        let mut calculations = vec![CalculationStep::new(
            StepCategory::Gratuity,
            "Service Period",
            service.years,
            format!(
                "{} days ÷ 365.25 = {} years ({} months)",
                service.days,
                fmt_money(service.years),
                service.months
            ),
        )];

        let is_eligible = service.months >= self.rules.eligibility_months;
        if !is_eligible {
            return GratuityResult {
                employee_id: employee.id.clone(),
                service_years: service.years,
                service_months: service.months,
                is_eligible,
                days_earned: Decimal::ZERO,
                daily_basic: Decimal::ZERO,
                accrued_amount: Decimal::ZERO,
                monthly_accrual: Decimal::ZERO,
                exit_reason: None,
                payable_amount: None,
                notes: format!(
                    "Not eligible - requires {} months service, has {} months",
                    self.rules.eligibility_months, service.months
                ),
                calculations,
            };
        }

        let exact_days_earned = service.exact_years * self.rules.days_per_year;
        let days_earned = round_money(exact_days_earned);
        let daily_basic = round_money(monthly_basic / self.rules.days_per_month);
        let accrued_amount = round_money(exact_days_earned * daily_basic);
        let monthly_accrual =
            round_money(self.rules.days_per_year / Decimal::from(12) * daily_basic);

        calculations.push(CalculationStep::new(
            StepCategory::Gratuity,
            "Days Earned",
            days_earned,
            format!(
                "{} years × {} days = {}",
                fmt_factor(service.exact_years),
                fmt_money(self.rules.days_per_year),
                fmt_factor(exact_days_earned)
            ),
        ));
        calculations.push(CalculationStep::new(
            StepCategory::Gratuity,
            "Daily Basic",
            daily_basic,
            format!(
                "{} ÷ {} = {}",
                fmt_money(monthly_basic),
                fmt_money(self.rules.days_per_month),
                fmt_money(daily_basic)
            ),
        ));
        calculations.push(CalculationStep::new(
            StepCategory::Gratuity,
            "Accrued Gratuity",
            accrued_amount,
            format!(
                "{} × {} = {}",
                fmt_factor(exact_days_earned),
                fmt_money(daily_basic),
                fmt_money(accrued_amount)
            ),
        ));
        calculations.push(CalculationStep::new(
            StepCategory::Gratuity,
            "Monthly Accrual",
            monthly_accrual,
            format!(
                "({} ÷ 12) × {} = {}",
                fmt_money(self.rules.days_per_year),
                fmt_money(daily_basic),
                fmt_money(monthly_accrual)
            ),
        ));

        GratuityResult {
            employee_id: employee.id.clone(),
            service_years: service.years,
            service_months: service.months,
            is_eligible,
            days_earned,
            daily_basic,
            accrued_amount,
            monthly_accrual,
            exit_reason: None,
            payable_amount: None,
            notes: "Gratuity accrual calculation".to_string(),
            calculations,
        }
    }

    /// Gratuity payable on exit, as of `as_of`.
    ///
    /// Retirement and termination pay the full accrued amount. Resignation
    /// pays nothing before 5 years, half from 5 to 10 years, and the full
    /// amount from 10 years. With no exit reason nothing is payable yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::GratuityCalculator;
    /// use payroll_engine::config::StatutoryRuleSet;
    /// use payroll_engine::models::{Employee, ExitReason};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let calculator = GratuityCalculator::new(&StatutoryRuleSet::india_default()).unwrap();
    /// let employee = Employee::new("emp_001", NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
    /// let as_of = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    ///
    /// let result = calculator.payable(
    ///     &employee,
    ///     Decimal::from(20000),
    ///     Some(ExitReason::Resignation),
    ///     as_of,
    /// );
    ///
    /// assert_eq!(result.accrued_amount, Decimal::from_str("60013.99").unwrap());
    /// assert_eq!(result.payable_amount, Some(Decimal::from_str("30007.00").unwrap()));
    /// ```
    pub fn payable(
        &self,
        employee: &Employee,
        monthly_basic: Decimal,
        exit_reason: Option<ExitReason>,
        as_of: NaiveDate,
    ) -> GratuityResult {
        let mut result = self.accrue(employee, monthly_basic, as_of);
        let accrued = result.accrued_amount;
        let years = result.service_years;

        let (payable, note) = match exit_reason {
            Some(ExitReason::Retirement) => (
                accrued,
                format!("Full gratuity payable on retirement: {}", fmt_money(accrued)),
            ),
            Some(ExitReason::Termination) => (
                accrued,
                format!(
                    "Full gratuity payable on termination: {}",
                    fmt_money(accrued)
                ),
            ),
            Some(ExitReason::Resignation) if years < RESIGNATION_MIN_YEARS => (
                Decimal::ZERO,
                "No gratuity on resignation before 5 years of service".to_string(),
            ),
            Some(ExitReason::Resignation) if years < RESIGNATION_FULL_YEARS => {
                let half = round_money(accrued / Decimal::TWO);
                (
                    half,
                    format!(
                        "50% gratuity on resignation (5-10 years): {}",
                        fmt_money(half)
                    ),
                )
            }
            Some(ExitReason::Resignation) => (
                accrued,
                format!(
                    "Full gratuity on resignation (10+ years): {}",
                    fmt_money(accrued)
                ),
            ),
            None => (
                Decimal::ZERO,
                format!(
                    "Gratuity accrued (still employed): {}",
                    fmt_money(accrued)
                ),
            ),
        };

        if result.is_eligible {
            result.notes = note;
        }
        result.calculations.push(CalculationStep::new(
            StepCategory::Gratuity,
            "Payable Gratuity",
            payable,
            format!(
                "{} on {} = {}",
                fmt_money(accrued),
                exit_reason.map_or("no exit", exit_label),
                fmt_money(payable)
            ),
        ));
        result.exit_reason = exit_reason;
        result.payable_amount = Some(payable);
        result
    }

    /// [`GratuityCalculator::accrue`] as of today's UTC date.
    pub fn accrue_today(&self, employee: &Employee, monthly_basic: Decimal) -> GratuityResult {
        self.accrue(employee, monthly_basic, Utc::now().date_naive())
    }

    /// [`GratuityCalculator::payable`] as of today's UTC date.
    pub fn payable_today(
        &self,
        employee: &Employee,
        monthly_basic: Decimal,
        exit_reason: Option<ExitReason>,
    ) -> GratuityResult {
        self.payable(employee, monthly_basic, exit_reason, Utc::now().date_naive())
    }

    /// Aggregates gratuity across employees.
    ///
    /// Employees with no known basic salary, or a zero basic, are skipped.
    /// Employees with an entry in `exit_reasons` get a payout computed; the
    /// rest are accrual only.
    pub fn summarize(
        &self,
        employees: &[Employee],
        basic_salaries: &HashMap<String, Decimal>,
        exit_reasons: &HashMap<String, ExitReason>,
        as_of: NaiveDate,
    ) -> GratuitySummary {
        let mut summary = GratuitySummary::default();

        for employee in employees {
            let Some(&basic) = basic_salaries.get(&employee.id) else {
                continue;
            };
            if basic.is_zero() {
                continue;
            }

            let result = match exit_reasons.get(&employee.id) {
                Some(&reason) => self.payable(employee, basic, Some(reason), as_of),
                None => self.accrue(employee, basic, as_of),
            };

            summary.total_accrued += result.accrued_amount;
            summary.total_payable += result.payable_amount.unwrap_or(Decimal::ZERO);
            if result.is_eligible {
                summary.eligible_count += 1;
            } else {
                summary.ineligible_count += 1;
            }
            summary.results.insert(employee.id.clone(), result);
        }

        summary
    }
}

fn exit_label(reason: ExitReason) -> &'static str {
    match reason {
        ExitReason::Retirement => "retirement",
        ExitReason::Resignation => "resignation",
        ExitReason::Termination => "termination",
    }
}
