//! Rule-set resolution and calculator construction.

use tracing::warn;

use crate::calculation::{GratuityCalculator, PayrollCalculator};
use crate::config::{ConfigLoader, StatutoryRuleSet};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, Employee, PayrollInput, SalaryStructure};
use crate::validation::ResultValidator;

/// Supplies the statutory rule set for a jurisdiction.
///
/// Implementations may read files, a database, or return constants. The
/// returned rule set is validated by the factory, not the resolver.
pub trait RuleSetResolver: Send + Sync {
    /// Returns the rule set for `jurisdiction` (e.g. "MH", "KA").
    fn resolve(&self, jurisdiction: &str) -> EngineResult<StatutoryRuleSet>;
}

/// Resolves every jurisdiction to [`StatutoryRuleSet::india_default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRuleSetResolver;

impl RuleSetResolver for DefaultRuleSetResolver {
    fn resolve(&self, _jurisdiction: &str) -> EngineResult<StatutoryRuleSet> {
        Ok(StatutoryRuleSet::india_default())
    }
}

impl RuleSetResolver for ConfigLoader {
    fn resolve(&self, jurisdiction: &str) -> EngineResult<StatutoryRuleSet> {
        Ok(self.rules_for(jurisdiction).clone())
    }
}

/// Builds calculators and validators for a jurisdiction.
///
/// # Example
///
/// ```
/// use payroll_engine::orchestrator::{CalculatorFactory, DefaultRuleSetResolver};
///
/// let factory = CalculatorFactory::new(DefaultRuleSetResolver);
/// let calculator = factory.create_calculator("MH").unwrap();
/// assert!(calculator.rules().provident_fund.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorFactory<R = DefaultRuleSetResolver> {
    resolver: R,
}

impl<R: RuleSetResolver> CalculatorFactory<R> {
    /// Creates a factory over a resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The resolver this factory uses.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolves and validates the rule set for a jurisdiction.
    pub fn rules_for(&self, jurisdiction: &str) -> EngineResult<StatutoryRuleSet> {
        self.resolver.resolve(jurisdiction).inspect_err(|e| {
            warn!(jurisdiction = %jurisdiction, error = %e, "Failed to resolve statutory rules");
        })
    }

    /// Builds a payroll calculator for a jurisdiction.
    pub fn create_calculator(&self, jurisdiction: &str) -> EngineResult<PayrollCalculator> {
        PayrollCalculator::new(self.rules_for(jurisdiction)?).inspect_err(|e| {
            warn!(jurisdiction = %jurisdiction, error = %e, "Rejected statutory rules");
        })
    }

    /// Builds a result validator for a jurisdiction.
    pub fn create_validator(&self, jurisdiction: &str) -> EngineResult<ResultValidator> {
        ResultValidator::new(self.rules_for(jurisdiction)?).inspect_err(|e| {
            warn!(jurisdiction = %jurisdiction, error = %e, "Rejected statutory rules");
        })
    }

    /// Builds a gratuity calculator for a jurisdiction.
    pub fn create_gratuity_calculator(
        &self,
        jurisdiction: &str,
    ) -> EngineResult<GratuityCalculator> {
        GratuityCalculator::new(&self.rules_for(jurisdiction)?).inspect_err(|e| {
            warn!(jurisdiction = %jurisdiction, error = %e, "Rejected statutory rules");
        })
    }

    /// Computes one employee's payroll after checking the attendance input.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidAttendance` if days worked is negative or
    /// days in month is not positive, and a configuration error if the
    /// jurisdiction's rule set cannot be used.
    pub fn compute_for_employee(
        &self,
        employee: &Employee,
        salary: &SalaryStructure,
        attendance: &PayrollInput,
        jurisdiction: &str,
    ) -> EngineResult<CalculationResult> {
        if !attendance.is_structurally_valid() {
            return Err(EngineError::InvalidAttendance {
                days_worked: attendance.days_worked,
                days_in_month: attendance.days_in_month,
            });
        }

        let calculator = self.create_calculator(jurisdiction)?;
        Ok(calculator.compute(employee, salary, attendance))
    }
}
