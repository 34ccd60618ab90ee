//! Post-calculation checks on payroll components and whole runs.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::round_money;
use crate::config::{StatutoryRuleSet, validate_rule_set};
use crate::error::EngineResult;
use crate::models::{
    Employee, PayrollComponent, SalaryStructure, Severity, ValidationCategory, ValidationError,
};

/// Deductions above this share of gross (in percent) raise a warning.
const HIGH_DEDUCTION_PERCENT: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Checks computed payroll for values that should not reach payment.
///
/// Diagnostics are returned as data; nothing here fails once the validator is
/// constructed.
#[derive(Debug, Clone)]
pub struct ResultValidator {
    rules: Arc<StatutoryRuleSet>,
}

impl ResultValidator {
    /// Validates the rule set and binds a validator to it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidRuleSet` if the rule set is unusable.
    pub fn new(rules: StatutoryRuleSet) -> EngineResult<Self> {
        Self::from_shared(Arc::new(rules))
    }

    /// Same as [`ResultValidator::new`] for a rule set that is already shared.
    pub fn from_shared(rules: Arc<StatutoryRuleSet>) -> EngineResult<Self> {
        validate_rule_set(&rules)?;
        Ok(Self { rules })
    }

    /// Checks one component.
    ///
    /// Employee and salary structure checks run only when those records are
    /// supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::calculate_payroll;
    /// use payroll_engine::config::StatutoryRuleSet;
    /// use payroll_engine::models::{Employee, PayrollComponent, PayrollInput, SalaryStructure};
    /// use payroll_engine::validation::ResultValidator;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let rules = StatutoryRuleSet::india_default();
    /// let employee = Employee::new("emp_001", NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
    /// let salary = SalaryStructure::basic_only(Decimal::from(20000));
    ///
    /// let mut input = PayrollInput::full_month(30);
    /// input.days_worked = 32;
    /// let result = calculate_payroll(&employee, &salary, &input, &rules);
    /// let component = PayrollComponent::from_result("emp_001", None, input, result);
    ///
    /// let validator = ResultValidator::new(rules).unwrap();
    /// let diagnostics = validator.validate_component(&component, None, None);
    ///
    /// assert!(diagnostics.iter().any(|d| d.code == "DAYS_WORKED_EXCEEDS_MONTH"));
    /// ```
    pub fn validate_component(
        &self,
        component: &PayrollComponent,
        employee: Option<&Employee>,
        salary: Option<&SalaryStructure>,
    ) -> Vec<ValidationError> {
        let mut diagnostics = Vec::new();

        check_amounts(component, &mut diagnostics);
        check_attendance(component, &mut diagnostics);
        check_deductions(component, &mut diagnostics);
        if let Some(employee) = employee {
            check_employee(employee, component, &mut diagnostics);
        }
        if let Some(salary) = salary {
            check_salary_structure(salary, component, &mut diagnostics);
        }
        self.check_statutory_application(component, &mut diagnostics);

        diagnostics
    }

    /// Run-level checks followed by component-level checks for every
    /// component, without employee or salary context.
    pub fn validate_all(
        &self,
        components: &[PayrollComponent],
        period: &str,
    ) -> Vec<ValidationError> {
        let mut diagnostics = self.validate_run(components, period);
        for component in components {
            diagnostics.extend(self.validate_component(component, None, None));
        }
        diagnostics
    }

    /// Checks a whole run.
    ///
    /// An empty run yields a single `NO_COMPONENTS` error and nothing else.
    pub fn validate_run(
        &self,
        components: &[PayrollComponent],
        period: &str,
    ) -> Vec<ValidationError> {
        debug!(period = %period, components = components.len(), "Validating payroll run");

        if components.is_empty() {
            return vec![ValidationError::new(
                "NO_COMPONENTS",
                Severity::Error,
                ValidationCategory::Payroll,
                "Payroll run has no employee components",
            )];
        }

        let mut diagnostics = Vec::new();

        let total_gross: Decimal = components.iter().map(|c| c.result.gross_amount).sum();
        let total_net: Decimal = components.iter().map(|c| c.result.net_pay).sum();

        if total_gross <= Decimal::ZERO {
            diagnostics.push(
                ValidationError::new(
                    "ZERO_PAYROLL",
                    Severity::Error,
                    ValidationCategory::Payroll,
                    "Total gross amount is zero or negative",
                )
                .with_amount(total_gross),
            );
        }

        if total_net < Decimal::ZERO {
            diagnostics.push(
                ValidationError::new(
                    "NEGATIVE_TOTAL_PAYROLL",
                    Severity::Error,
                    ValidationCategory::Payroll,
                    "Total net pay is negative",
                )
                .with_amount(total_net),
            );
        }

        for component in components {
            if component.result.basic_pay.is_zero() && component.result.gross_amount.is_zero() {
                diagnostics.push(
                    ValidationError::new(
                        "INCOMPLETE_CALCULATION",
                        Severity::Error,
                        ValidationCategory::Salary,
                        "Employee component not properly calculated",
                    )
                    .for_employee(&component.employee_id),
                );
            }

            if !component.is_validated {
                diagnostics.push(
                    ValidationError::new(
                        "UNVALIDATED_COMPONENT",
                        Severity::Warning,
                        ValidationCategory::Validation,
                        "Employee component not validated",
                    )
                    .for_employee(&component.employee_id),
                );
            }
        }

        diagnostics
    }

    fn check_statutory_application(
        &self,
        component: &PayrollComponent,
        diagnostics: &mut Vec<ValidationError>,
    ) {
        let result = &component.result;

        if let Some(pf) = &self.rules.provident_fund {
            let pf_wage = result.basic_pay + result.dearness_allowance;
            if pf.wage_ceiling > Decimal::ZERO && pf_wage > pf.wage_ceiling {
                diagnostics.push(
                    ValidationError::new(
                        "PF_WAGE_CAPPED",
                        Severity::Info,
                        ValidationCategory::Statutory,
                        format!(
                            "PF wage base capped at {:.2} (basic + DA = {:.2})",
                            pf.wage_ceiling, pf_wage
                        ),
                    )
                    .with_amount(pf_wage)
                    .for_employee(&component.employee_id),
                );
            }
        }

        if let Some(esi) = &self.rules.state_insurance {
            if esi.salary_threshold > Decimal::ZERO && result.gross_amount > esi.salary_threshold {
                diagnostics.push(
                    ValidationError::new(
                        "ESI_NOT_APPLICABLE",
                        Severity::Info,
                        ValidationCategory::Statutory,
                        format!(
                            "Gross amount exceeds ESI salary threshold of {:.2}",
                            esi.salary_threshold
                        ),
                    )
                    .with_amount(result.gross_amount)
                    .for_employee(&component.employee_id),
                );
            }
        }
    }
}

fn check_amounts(component: &PayrollComponent, diagnostics: &mut Vec<ValidationError>) {
    let result = &component.result;
    let employee_id = &component.employee_id;

    let negatives = [
        (
            "INVALID_BASIC_PAY",
            ValidationCategory::Salary,
            "Basic pay cannot be negative",
            result.basic_pay,
        ),
        (
            "INVALID_GROSS_AMOUNT",
            ValidationCategory::Salary,
            "Gross amount cannot be negative",
            result.gross_amount,
        ),
        (
            "NEGATIVE_NET_PAY",
            ValidationCategory::Salary,
            "Net pay is negative - total deductions exceed gross amount",
            result.net_pay,
        ),
        (
            "INVALID_DEDUCTIONS",
            ValidationCategory::Deductions,
            "Total deductions cannot be negative",
            result.total_deductions,
        ),
    ];
    for (code, category, message, amount) in negatives {
        if amount < Decimal::ZERO {
            diagnostics.push(
                ValidationError::new(code, Severity::Error, category, message)
                    .with_amount(amount)
                    .for_employee(employee_id),
            );
        }
    }

    if result.gross_amount > Decimal::ZERO {
        let percent = result.total_deductions / result.gross_amount * Decimal::ONE_HUNDRED;
        if percent > HIGH_DEDUCTION_PERCENT {
            diagnostics.push(
                ValidationError::new(
                    "HIGH_DEDUCTIONS",
                    Severity::Warning,
                    ValidationCategory::Deductions,
                    format!(
                        "Total deductions ({:.2}%) exceed 60% of gross amount",
                        round_money(percent)
                    ),
                )
                .with_amount(result.total_deductions)
                .for_employee(employee_id),
            );
        }
    }
}

fn check_attendance(component: &PayrollComponent, diagnostics: &mut Vec<ValidationError>) {
    let attendance = &component.attendance;
    let mut push = |code: &str, message: String| {
        diagnostics.push(
            ValidationError::new(code, Severity::Error, ValidationCategory::Attendance, message)
                .for_employee(&component.employee_id),
        );
    };

    if attendance.days_in_month <= 0 {
        push(
            "INVALID_DAYS_IN_MONTH",
            "Days in month must be greater than 0".to_string(),
        );
    }

    if attendance.days_worked < 0 {
        push(
            "INVALID_DAYS_WORKED",
            "Days worked cannot be negative".to_string(),
        );
    }

    if attendance.days_worked > attendance.days_in_month {
        push(
            "DAYS_WORKED_EXCEEDS_MONTH",
            format!(
                "Days worked ({}) cannot exceed days in month ({})",
                attendance.days_worked, attendance.days_in_month
            ),
        );
    }

    if attendance.days_accounted() > i64::from(attendance.days_in_month) {
        push(
            "DAYS_TOTAL_MISMATCH",
            format!(
                "Total days (worked: {}, absent: {}, leave: {}) do not match days in month ({})",
                attendance.days_worked,
                attendance.days_absent,
                attendance.days_leave,
                attendance.days_in_month
            ),
        );
    }
}

fn check_deductions(component: &PayrollComponent, diagnostics: &mut Vec<ValidationError>) {
    let result = &component.result;

    let negatives = [
        ("INVALID_PF", "PF deduction cannot be negative", result.pf_employee),
        ("INVALID_ESI", "ESI deduction cannot be negative", result.esi_employee),
        (
            "INVALID_PT",
            "Professional Tax cannot be negative",
            result.professional_tax,
        ),
        ("INVALID_TDS", "TDS cannot be negative", result.tds),
    ];
    for (code, message, amount) in negatives {
        if amount < Decimal::ZERO {
            diagnostics.push(
                ValidationError::new(code, Severity::Error, ValidationCategory::Deductions, message)
                    .with_amount(amount)
                    .for_employee(&component.employee_id),
            );
        }
    }

    if result.advance_recovery > Decimal::ZERO && result.advance_recovery > result.gross_amount {
        diagnostics.push(
            ValidationError::new(
                "ADVANCE_RECOVERY_EXCEEDS_GROSS",
                Severity::Error,
                ValidationCategory::Deductions,
                format!(
                    "Advance recovery ({:.2}) cannot exceed gross amount ({:.2})",
                    round_money(result.advance_recovery),
                    round_money(result.gross_amount)
                ),
            )
            .with_amount(result.advance_recovery)
            .for_employee(&component.employee_id),
        );
    }
}

fn check_employee(
    employee: &Employee,
    component: &PayrollComponent,
    diagnostics: &mut Vec<ValidationError>,
) {
    let mut push = |code: &str, message: &str| {
        diagnostics.push(
            ValidationError::new(code, Severity::Warning, ValidationCategory::Employee, message)
                .for_employee(&component.employee_id),
        );
    };

    if employee.has_left() {
        push(
            "EMPLOYEE_LEFT",
            "Processing payroll for an employee who has left the organization",
        );
    }

    if !employee.has_bank_details() {
        push(
            "MISSING_BANK_DETAILS",
            "Employee has incomplete bank details - payment may fail",
        );
    }

    if !employee.has_tax_id() {
        push(
            "MISSING_PAN",
            "Employee does not have PAN - TDS calculation accuracy affected",
        );
    }
}

fn check_salary_structure(
    salary: &SalaryStructure,
    component: &PayrollComponent,
    diagnostics: &mut Vec<ValidationError>,
) {
    if salary.monthly_basic <= Decimal::ZERO {
        diagnostics.push(
            ValidationError::new(
                "INVALID_SALARY_STRUCTURE",
                Severity::Error,
                ValidationCategory::Salary,
                "Salary structure basic pay must be greater than 0",
            )
            .with_amount(salary.monthly_basic)
            .for_employee(&component.employee_id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payroll;
    use crate::config::StateInsuranceRules;
    use crate::models::{CalculationResult, EmploymentStatus, PayrollInput};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn validator() -> ResultValidator {
        ResultValidator::new(StatutoryRuleSet::india_default()).unwrap()
    }

    fn complete_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            employment_status: EmploymentStatus::Active,
            date_of_joining: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            bank_account_number: Some("50100012345678".to_string()),
            bank_ifsc_code: Some("HDFC0001234".to_string()),
            personal_pan: Some("ABCDE1234F".to_string()),
        }
    }

    fn computed(basic: &str, input: PayrollInput) -> PayrollComponent {
        let salary = SalaryStructure::basic_only(dec(basic));
        let result = calculate_payroll(
            &complete_employee(),
            &salary,
            &input,
            &StatutoryRuleSet::india_default(),
        );
        PayrollComponent::from_result("emp_001", None, input, result)
    }

    fn codes(diagnostics: &[ValidationError]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_clean_component_has_no_diagnostics() {
        let component = computed("14000", PayrollInput::full_month(30));
        let salary = SalaryStructure::basic_only(dec("14000"));

        let diagnostics =
            validator().validate_component(&component, Some(&complete_employee()), Some(&salary));

        assert!(diagnostics.is_empty(), "unexpected: {:?}", codes(&diagnostics));
    }

    #[test]
    fn test_days_worked_exceeding_month() {
        let mut input = PayrollInput::full_month(30);
        input.days_worked = 32;
        let component = computed("14000", input);

        let diagnostics = validator().validate_component(&component, None, None);

        let exceeded = diagnostics
            .iter()
            .find(|d| d.code == "DAYS_WORKED_EXCEEDS_MONTH")
            .unwrap();
        assert_eq!(exceeded.severity, Severity::Error);
        assert_eq!(
            exceeded.message,
            "Days worked (32) cannot exceed days in month (30)"
        );
        assert!(codes(&diagnostics).contains(&"DAYS_TOTAL_MISMATCH"));
    }

    #[test]
    fn test_invalid_attendance_fields() {
        let mut component = computed("14000", PayrollInput::full_month(30));
        component.attendance.days_in_month = 0;
        component.attendance.days_worked = -1;

        let diagnostics = validator().validate_component(&component, None, None);

        let codes = codes(&diagnostics);
        assert!(codes.contains(&"INVALID_DAYS_IN_MONTH"));
        assert!(codes.contains(&"INVALID_DAYS_WORKED"));
    }

    #[test]
    fn test_absent_and_leave_days_push_total_over_month() {
        let mut input = PayrollInput::full_month(30);
        input.days_worked = 25;
        input.days_absent = 3;
        input.days_leave = 3;
        let component = computed("14000", input);

        let diagnostics = validator().validate_component(&component, None, None);

        assert_eq!(codes(&diagnostics), vec!["DAYS_TOTAL_MISMATCH"]);
    }

    #[test]
    fn test_huge_absent_days_are_a_mismatch() {
        let mut input = PayrollInput::full_month(30);
        input.days_absent = i32::MAX;
        let component = computed("14000", input);

        let diagnostics = validator().validate_component(&component, None, None);

        assert_eq!(codes(&diagnostics), vec!["DAYS_TOTAL_MISMATCH"]);
    }

    #[test]
    fn test_negative_figures_are_errors() {
        let mut component = computed("14000", PayrollInput::full_month(30));
        component.result = CalculationResult {
            basic_pay: dec("-1"),
            gross_amount: dec("-1"),
            net_pay: dec("-5"),
            total_deductions: dec("-2"),
            pf_employee: dec("-1"),
            esi_employee: dec("-1"),
            professional_tax: dec("-1"),
            tds: dec("-1"),
            ..CalculationResult::default()
        };

        let diagnostics = validator().validate_component(&component, None, None);

        assert_eq!(
            codes(&diagnostics),
            vec![
                "INVALID_BASIC_PAY",
                "INVALID_GROSS_AMOUNT",
                "NEGATIVE_NET_PAY",
                "INVALID_DEDUCTIONS",
                "INVALID_PF",
                "INVALID_ESI",
                "INVALID_PT",
                "INVALID_TDS",
            ]
        );
        assert_eq!(diagnostics[2].amount, Some(dec("-5")));
    }

    #[test]
    fn test_high_deductions_warning() {
        let mut input = PayrollInput::full_month(30);
        input.loan_recovery = dec("8000");
        let component = computed("14000", input);

        let diagnostics = validator().validate_component(&component, None, None);

        let warning = diagnostics
            .iter()
            .find(|d| d.code == "HIGH_DEDUCTIONS")
            .unwrap();
        assert_eq!(warning.severity, Severity::Warning);
        assert!(warning.message.contains("exceed 60% of gross amount"));
    }

    #[test]
    fn test_advance_recovery_exceeding_gross() {
        let mut input = PayrollInput::full_month(30);
        input.advance_recovery = dec("15000");
        let component = computed("10000", input);

        let diagnostics = validator().validate_component(&component, None, None);

        let error = diagnostics
            .iter()
            .find(|d| d.code == "ADVANCE_RECOVERY_EXCEEDS_GROSS")
            .unwrap();
        assert_eq!(
            error.message,
            "Advance recovery (15000.00) cannot exceed gross amount (10000.00)"
        );
    }

    #[test]
    fn test_employee_warnings() {
        let component = computed("14000", PayrollInput::full_month(30));
        let mut employee = Employee::new("emp_001", NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
        employee.employment_status = EmploymentStatus::Left;

        let diagnostics = validator().validate_component(&component, Some(&employee), None);

        assert_eq!(
            codes(&diagnostics),
            vec!["EMPLOYEE_LEFT", "MISSING_BANK_DETAILS", "MISSING_PAN"]
        );
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn test_zero_basic_salary_structure() {
        let component = computed("14000", PayrollInput::full_month(30));
        let salary = SalaryStructure::basic_only(Decimal::ZERO);

        let diagnostics = validator().validate_component(&component, None, Some(&salary));

        assert_eq!(codes(&diagnostics), vec!["INVALID_SALARY_STRUCTURE"]);
    }

    #[test]
    fn test_pf_wage_capped_is_info() {
        let component = computed("20000", PayrollInput::full_month(30));

        let diagnostics = validator().validate_component(&component, None, None);

        let info = diagnostics
            .iter()
            .find(|d| d.code == "PF_WAGE_CAPPED")
            .unwrap();
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(
            info.message,
            "PF wage base capped at 15000.00 (basic + DA = 20000.00)"
        );
    }

    #[test]
    fn test_esi_not_applicable_is_info() {
        let mut rules = StatutoryRuleSet::india_default();
        rules.state_insurance = Some(StateInsuranceRules {
            employee_rate: dec("0.75"),
            employer_rate: dec("3.25"),
            wage_ceiling: dec("21000"),
            salary_threshold: dec("21000"),
        });
        let validator = ResultValidator::new(rules).unwrap();
        let component = computed("14000", PayrollInput::full_month(30));
        let mut over = component.clone();
        over.result.gross_amount = dec("25000");

        assert!(validator.validate_component(&component, None, None).is_empty());
        assert_eq!(
            codes(&validator.validate_component(&over, None, None)),
            vec!["ESI_NOT_APPLICABLE"]
        );
    }

    #[test]
    fn test_empty_run_reports_only_no_components() {
        let diagnostics = validator().validate_run(&[], "2024-03");

        assert_eq!(codes(&diagnostics), vec!["NO_COMPONENTS"]);
    }

    #[test]
    fn test_run_with_zero_component() {
        let mut zero_days = PayrollInput::full_month(30);
        zero_days.days_worked = 0;
        let mut component = computed("14000", zero_days);
        component.is_validated = true;

        let diagnostics = validator().validate_run(&[component], "2024-03");

        assert_eq!(
            codes(&diagnostics),
            vec!["ZERO_PAYROLL", "INCOMPLETE_CALCULATION"]
        );
    }

    #[test]
    fn test_run_flags_unvalidated_components() {
        let mut validated = computed("14000", PayrollInput::full_month(30));
        validated.is_validated = true;
        let mut unvalidated = computed("14000", PayrollInput::full_month(30));
        unvalidated.employee_id = "emp_002".to_string();

        let diagnostics = validator().validate_run(&[validated, unvalidated], "2024-03");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "UNVALIDATED_COMPONENT");
        assert_eq!(diagnostics[0].employee_id.as_deref(), Some("emp_002"));
    }

    #[test]
    fn test_negative_total_net_pay() {
        let mut component = computed("14000", PayrollInput::full_month(30));
        component.is_validated = true;
        component.result.net_pay = dec("-100");

        let diagnostics = validator().validate_run(&[component], "2024-03");

        assert_eq!(codes(&diagnostics), vec!["NEGATIVE_TOTAL_PAYROLL"]);
    }
}
