//! In-memory payroll run lifecycle.
//!
//! ```text
//! draft ──initiate──▶ in_progress ──dry_run──▶ dry_run
//!                          │                      │
//!                          └──────finalize────────┴──▶ finalized ──approve──▶ locked ──release──▶ released
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollComponent, ValidationError};
use crate::validation::ResultValidator;

use super::batch::BatchOutcome;

/// Where a payroll run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created, nothing computed yet.
    Draft,
    /// Components computed.
    InProgress,
    /// At least one dry run passed validation.
    DryRun,
    /// Validated and ready for approval.
    Finalized,
    /// Approved; figures can no longer change.
    Locked,
    /// Released for payment.
    Released,
}

impl RunStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Draft => "draft",
            RunStatus::InProgress => "in_progress",
            RunStatus::DryRun => "dry_run",
            RunStatus::Finalized => "finalized",
            RunStatus::Locked => "locked",
            RunStatus::Released => "released",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial totals for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run identifier.
    pub run_id: Uuid,
    /// The payroll period.
    pub period: String,
    /// Current status.
    pub status: RunStatus,
    /// Number of components in the run.
    pub total_employees: usize,
    /// Sum of gross amounts.
    pub total_gross_amount: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net_amount: Decimal,
    /// Sum of employee PF.
    pub total_pf_employee: Decimal,
    /// Sum of employer PF.
    pub total_pf_employer: Decimal,
    /// Sum of employee ESI.
    pub total_esi_employee: Decimal,
    /// Sum of employer ESI.
    pub total_esi_employer: Decimal,
    /// Sum of professional tax.
    pub total_professional_tax: Decimal,
    /// Sum of withholding tax.
    pub total_tds: Decimal,
}

/// A payroll run for one period.
#[derive(Debug, Clone)]
pub struct PayrollRun {
    id: Uuid,
    period: String,
    status: RunStatus,
    components: Vec<PayrollComponent>,
    dry_run_count: u32,
}

impl PayrollRun {
    /// Creates a draft run.
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            period: period.into(),
            status: RunStatus::Draft,
            components: Vec::new(),
            dry_run_count: 0,
        }
    }

    /// Run identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The payroll period.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Current status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Components in the run.
    pub fn components(&self) -> &[PayrollComponent] {
        &self.components
    }

    /// Number of dry runs performed.
    pub fn dry_run_count(&self) -> u32 {
        self.dry_run_count
    }

    /// Loads a batch outcome's components and moves the run to `in_progress`.
    ///
    /// # Errors
    ///
    /// Fails if the run is not a draft, or if the outcome is for another
    /// period.
    pub fn initiate(&mut self, outcome: BatchOutcome) -> EngineResult<()> {
        self.require(&[RunStatus::Draft], RunStatus::InProgress)?;
        if outcome.period != self.period {
            return Err(EngineError::InvalidInput {
                field: "period".to_string(),
                message: format!(
                    "batch outcome is for '{}', run is for '{}'",
                    outcome.period, self.period
                ),
            });
        }

        self.components = outcome.components;
        self.transition(RunStatus::InProgress);
        Ok(())
    }

    /// Validates the run and each component in it.
    pub fn validate(&self, validator: &ResultValidator) -> Vec<ValidationError> {
        validator.validate_all(&self.components, &self.period)
    }

    /// Validates without committing; moves to `dry_run` when no errors remain.
    ///
    /// Returns the remaining warnings and info diagnostics.
    pub fn dry_run(&mut self, validator: &ResultValidator) -> EngineResult<Vec<ValidationError>> {
        self.require(&[RunStatus::InProgress, RunStatus::DryRun], RunStatus::DryRun)?;
        self.dry_run_count += 1;

        let diagnostics = self.validated(validator)?;
        self.transition(RunStatus::DryRun);
        Ok(diagnostics)
    }

    /// Re-runs validation and moves to `finalized` when no errors remain.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ValidationFailed` if any error-severity
    /// diagnostic is found.
    pub fn finalize(&mut self, validator: &ResultValidator) -> EngineResult<Vec<ValidationError>> {
        self.require(
            &[RunStatus::InProgress, RunStatus::DryRun],
            RunStatus::Finalized,
        )?;

        let diagnostics = self.validated(validator)?;
        self.transition(RunStatus::Finalized);
        Ok(diagnostics)
    }

    /// Approves a finalized run, locking it.
    pub fn approve(&mut self) -> EngineResult<()> {
        self.require(&[RunStatus::Finalized], RunStatus::Locked)?;
        self.transition(RunStatus::Locked);
        Ok(())
    }

    /// Releases a locked run for payment.
    pub fn release(&mut self) -> EngineResult<()> {
        self.require(&[RunStatus::Locked], RunStatus::Released)?;
        self.transition(RunStatus::Released);
        Ok(())
    }

    /// Totals across all components.
    pub fn summary(&self) -> RunSummary {
        let sum = |field: fn(&PayrollComponent) -> Decimal| -> Decimal {
            self.components.iter().map(field).sum()
        };

        RunSummary {
            run_id: self.id,
            period: self.period.clone(),
            status: self.status,
            total_employees: self.components.len(),
            total_gross_amount: sum(|c| c.result.gross_amount),
            total_deductions: sum(|c| c.result.total_deductions),
            total_net_amount: sum(|c| c.result.net_pay),
            total_pf_employee: sum(|c| c.result.pf_employee),
            total_pf_employer: sum(|c| c.result.pf_employer),
            total_esi_employee: sum(|c| c.result.esi_employee),
            total_esi_employer: sum(|c| c.result.esi_employer),
            total_professional_tax: sum(|c| c.result.professional_tax),
            total_tds: sum(|c| c.result.tds),
        }
    }

    fn validated(&self, validator: &ResultValidator) -> EngineResult<Vec<ValidationError>> {
        let diagnostics = self.validate(validator);
        let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
        if error_count > 0 {
            return Err(EngineError::ValidationFailed { error_count });
        }
        Ok(diagnostics)
    }

    fn require(&self, allowed: &[RunStatus], target: RunStatus) -> EngineResult<()> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(EngineError::InvalidRunTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            })
        }
    }

    fn transition(&mut self, target: RunStatus) {
        info!(
            run_id = %self.id,
            period = %self.period,
            from = %self.status,
            to = %target,
            "Payroll run status changed"
        );
        self.status = target;
    }
}
