//! Batch payroll runs over many employees.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::PayrollCalculator;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DEFAULT_DAYS_IN_MONTH, Employee, PayrollComponent, PayrollInput, SalaryStructure,
    ValidationError,
};
use crate::validation::{ResultValidator, has_critical_errors};

use super::audit::CalculationAuditTrail;
use super::factory::{CalculatorFactory, RuleSetResolver};

/// Where a batch run reads salary structures and attendance from.
///
/// `Ok(None)` means the record does not exist; `Err` means the lookup itself
/// failed.
pub trait PayrollDataSource: Send + Sync {
    /// The employee's current salary structure.
    fn salary_structure(&self, employee_id: &str) -> EngineResult<Option<SalaryStructure>>;

    /// The employee's attendance summary for a period.
    fn attendance(&self, employee_id: &str, period: &str) -> EngineResult<Option<PayrollInput>>;
}

/// A [`PayrollDataSource`] backed by in-memory maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    salary_structures: HashMap<String, SalaryStructure>,
    attendance: HashMap<(String, String), PayrollInput>,
}

impl InMemoryDataSource {
    /// Creates an empty data source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee's salary structure.
    pub fn with_salary_structure(
        mut self,
        employee_id: impl Into<String>,
        salary: SalaryStructure,
    ) -> Self {
        self.salary_structures.insert(employee_id.into(), salary);
        self
    }

    /// Adds or replaces an employee's attendance for a period.
    pub fn with_attendance(
        mut self,
        employee_id: impl Into<String>,
        period: impl Into<String>,
        attendance: PayrollInput,
    ) -> Self {
        self.attendance
            .insert((employee_id.into(), period.into()), attendance);
        self
    }
}

impl PayrollDataSource for InMemoryDataSource {
    fn salary_structure(&self, employee_id: &str) -> EngineResult<Option<SalaryStructure>> {
        Ok(self.salary_structures.get(employee_id).cloned())
    }

    fn attendance(&self, employee_id: &str, period: &str) -> EngineResult<Option<PayrollInput>> {
        Ok(self
            .attendance
            .get(&(employee_id.to_string(), period.to_string()))
            .cloned())
    }
}

/// Why an employee was left out of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No salary structure on file.
    MissingSalaryStructure,
    /// The data source failed.
    DataSourceError,
    /// Attendance was structurally invalid and could not be computed.
    InvalidAttendance,
    /// The computed result had error-severity diagnostics.
    CriticalValidationErrors,
}

/// One employee that a batch could not produce a component for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee that failed.
    pub employee_id: String,
    /// Why it failed.
    pub reason: FailureReason,
    /// Human-readable detail.
    pub message: String,
    /// Diagnostics, for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ValidationError>,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The period the batch ran for.
    pub period: String,
    /// Components for employees that passed validation, in input order.
    pub components: Vec<PayrollComponent>,
    /// Employees that did not produce a component, in input order.
    pub failures: Vec<BatchFailure>,
    /// One trail per employee whose payroll was computed.
    pub audit_trails: Vec<CalculationAuditTrail>,
    /// Number of components produced.
    pub success_count: usize,
    /// Number of failures.
    pub failure_count: usize,
}

/// Computes and validates payroll for a list of employees.
///
/// Employees are processed in parallel. A failure for one employee is
/// recorded and never stops the rest of the batch.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, SalaryStructure};
/// use payroll_engine::orchestrator::{
///     BatchRunner, CalculatorFactory, DefaultRuleSetResolver, InMemoryDataSource,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let factory = CalculatorFactory::new(DefaultRuleSetResolver);
/// let data = InMemoryDataSource::new()
///     .with_salary_structure("emp_001", SalaryStructure::basic_only(Decimal::from(20000)));
/// let runner = BatchRunner::new(&factory, "MH", data).unwrap();
///
/// let employees = vec![
///     Employee::new("emp_001", NaiveDate::from_ymd_opt(2020, 4, 1).unwrap()),
///     Employee::new("emp_002", NaiveDate::from_ymd_opt(2021, 7, 1).unwrap()),
/// ];
/// let outcome = runner.run(&employees, "2024-03");
///
/// assert_eq!(outcome.success_count, 1);
/// assert_eq!(outcome.failure_count, 1);
/// ```
#[derive(Debug)]
pub struct BatchRunner<D> {
    calculator: PayrollCalculator,
    validator: ResultValidator,
    data_source: D,
    calculated_by: String,
}

impl<D: PayrollDataSource> BatchRunner<D> {
    /// Builds a runner with the jurisdiction's calculator and validator.
    pub fn new<R: RuleSetResolver>(
        factory: &CalculatorFactory<R>,
        jurisdiction: &str,
        data_source: D,
    ) -> EngineResult<Self> {
        Ok(Self {
            calculator: factory.create_calculator(jurisdiction)?,
            validator: factory.create_validator(jurisdiction)?,
            data_source,
            calculated_by: "system".to_string(),
        })
    }

    /// Sets the actor recorded on audit trails.
    pub fn calculated_by(mut self, actor: impl Into<String>) -> Self {
        self.calculated_by = actor.into();
        self
    }

    /// The validator used for components.
    pub fn validator(&self) -> &ResultValidator {
        &self.validator
    }

    /// Runs the batch for `period`.
    pub fn run(&self, employees: &[Employee], period: &str) -> BatchOutcome {
        info!(period = %period, employees = employees.len(), "Starting payroll batch");

        let runs: Vec<EmployeeRun> = employees
            .par_iter()
            .map(|employee| self.process(employee, period))
            .collect();

        let mut components = Vec::new();
        let mut failures = Vec::new();
        let mut audit_trails = Vec::new();
        for run in runs {
            audit_trails.extend(run.audit_trail);
            match run.outcome {
                Ok(component) => components.push(component),
                Err(failure) => {
                    warn!(
                        employee_id = %failure.employee_id,
                        reason = ?failure.reason,
                        message = %failure.message,
                        "Employee excluded from payroll batch"
                    );
                    failures.push(failure);
                }
            }
        }

        let outcome = BatchOutcome {
            period: period.to_string(),
            success_count: components.len(),
            failure_count: failures.len(),
            components,
            failures,
            audit_trails,
        };

        info!(
            period = %period,
            succeeded = outcome.success_count,
            failed = outcome.failure_count,
            "Finished payroll batch"
        );

        outcome
    }

    fn process(&self, employee: &Employee, period: &str) -> EmployeeRun {
        let failure = |reason: FailureReason, message: String| EmployeeRun {
            outcome: Err(BatchFailure {
                employee_id: employee.id.clone(),
                reason,
                message,
                diagnostics: Vec::new(),
            }),
            audit_trail: None,
        };

        let salary = match self.data_source.salary_structure(&employee.id) {
            Ok(Some(salary)) => salary,
            Ok(None) => {
                return failure(
                    FailureReason::MissingSalaryStructure,
                    "No salary structure on file".to_string(),
                );
            }
            Err(e) => return failure(FailureReason::DataSourceError, e.to_string()),
        };

        let attendance = match self.data_source.attendance(&employee.id, period) {
            Ok(attendance) => {
                attendance.unwrap_or_else(|| PayrollInput::full_month(DEFAULT_DAYS_IN_MONTH))
            }
            Err(e) => return failure(FailureReason::DataSourceError, e.to_string()),
        };
        if !attendance.is_structurally_valid() {
            let error = EngineError::InvalidAttendance {
                days_worked: attendance.days_worked,
                days_in_month: attendance.days_in_month,
            };
            return failure(FailureReason::InvalidAttendance, error.to_string());
        }

        let result = self.calculator.compute(employee, &salary, &attendance);
        let mut component =
            PayrollComponent::from_result(&employee.id, salary.id.clone(), attendance, result);

        let diagnostics =
            self.validator
                .validate_component(&component, Some(employee), Some(&salary));
        let audit_trail = CalculationAuditTrail::record(
            &employee.id,
            period,
            &component.result,
            diagnostics.clone(),
            &self.calculated_by,
        );

        if has_critical_errors(&diagnostics) {
            let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
            return EmployeeRun {
                outcome: Err(BatchFailure {
                    employee_id: employee.id.clone(),
                    reason: FailureReason::CriticalValidationErrors,
                    message: format!("{error_count} error(s) in computed payroll"),
                    diagnostics,
                }),
                audit_trail: Some(audit_trail),
            };
        }

        component.is_validated = true;
        EmployeeRun {
            outcome: Ok(component),
            audit_trail: Some(audit_trail),
        }
    }
}

struct EmployeeRun {
    outcome: Result<PayrollComponent, BatchFailure>,
    audit_trail: Option<CalculationAuditTrail>,
}
