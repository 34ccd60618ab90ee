//! Orchestration around the calculators.
//!
//! Resolves rule sets per jurisdiction, builds calculators and validators,
//! runs batches across employees and tracks a payroll run through its
//! lifecycle.

mod audit;
mod batch;
mod factory;
mod run;

pub use audit::{AuditStatus, CalculationAuditTrail};
pub use batch::{
    BatchFailure, BatchOutcome, BatchRunner, FailureReason, InMemoryDataSource, PayrollDataSource,
};
pub use factory::{CalculatorFactory, DefaultRuleSetResolver, RuleSetResolver};
pub use run::{PayrollRun, RunStatus, RunSummary};
