//! Result validation.
//!
//! Checks computed payroll components and whole runs, producing
//! [`ValidationError`](crate::models::ValidationError) diagnostics graded by
//! severity.

mod result_validator;
mod summary;

pub use result_validator::ResultValidator;
pub use summary::{SeveritySummary, has_critical_errors, summarize_errors};
