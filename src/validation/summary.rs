//! Severity counts over a set of diagnostics.

use serde::{Deserialize, Serialize};

use crate::models::{Severity, ValidationError};

/// Number of diagnostics at each severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    /// Error-severity diagnostics.
    pub errors: usize,
    /// Warning-severity diagnostics.
    pub warnings: usize,
    /// Info-severity diagnostics.
    pub info: usize,
}

/// Counts diagnostics by severity.
pub fn summarize_errors(diagnostics: &[ValidationError]) -> SeveritySummary {
    diagnostics
        .iter()
        .fold(SeveritySummary::default(), |mut summary, diagnostic| {
            match diagnostic.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
            summary
        })
}

/// Returns true if any diagnostic is error severity.
pub fn has_critical_errors(diagnostics: &[ValidationError]) -> bool {
    diagnostics.iter().any(ValidationError::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationCategory;

    fn diagnostic(severity: Severity) -> ValidationError {
        ValidationError::new("TEST", severity, ValidationCategory::Payroll, "test")
    }

    #[test]
    fn test_counts_each_severity() {
        let diagnostics = vec![
            diagnostic(Severity::Error),
            diagnostic(Severity::Warning),
            diagnostic(Severity::Warning),
            diagnostic(Severity::Info),
        ];

        let summary = summarize_errors(&diagnostics);

        assert_eq!(
            summary,
            SeveritySummary {
                errors: 1,
                warnings: 2,
                info: 1
            }
        );
    }

    #[test]
    fn test_empty_list_has_no_critical_errors() {
        assert!(!has_critical_errors(&[]));
        assert_eq!(summarize_errors(&[]), SeveritySummary::default());
    }

    #[test]
    fn test_warnings_are_not_critical() {
        let diagnostics = vec![diagnostic(Severity::Warning), diagnostic(Severity::Info)];
        assert!(!has_critical_errors(&diagnostics));
    }

    #[test]
    fn test_single_error_is_critical() {
        let diagnostics = vec![diagnostic(Severity::Info), diagnostic(Severity::Error)];
        assert!(has_critical_errors(&diagnostics));
    }
}
