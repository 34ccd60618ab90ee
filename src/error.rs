//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report: bad configuration, rejected
//! input, data source failures and illegal payroll run transitions.
//!
//! Computed-value problems (a negative net pay, a missing PAN, ...) are not
//! errors in this sense. They are reported as
//! [`ValidationError`](crate::models::ValidationError) diagnostics.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidRuleSet {
///     message: "PF rules not configured".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid statutory rules: PF rules not configured");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A statutory rule set failed its well-formedness checks.
    #[error("Invalid statutory rules: {message}")]
    InvalidRuleSet {
        /// What was wrong with the rule set.
        message: String,
    },

    /// Attendance data cannot be used for a calculation.
    #[error("Invalid attendance data: days_worked={days_worked}, days_in_month={days_in_month}")]
    InvalidAttendance {
        /// Days worked as supplied.
        days_worked: i32,
        /// Days in month as supplied.
        days_in_month: i32,
    },

    /// An input record was structurally invalid.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payroll data source failed to return a record.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the failure.
        message: String,
    },

    /// A payroll run could not be finalized because validation found errors.
    #[error("Payroll validation failed with {error_count} errors")]
    ValidationFailed {
        /// Number of error-severity diagnostics.
        error_count: usize,
    },

    /// A payroll run was asked to move to a status it cannot reach.
    #[error("Payroll run cannot move from '{from}' to '{to}'")]
    InvalidRunTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rule_set_displays_message() {
        let error = EngineError::InvalidRuleSet {
            message: "TDS slabs must be in ascending order".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid statutory rules: TDS slabs must be in ascending order"
        );
    }

    #[test]
    fn test_invalid_attendance_displays_days() {
        let error = EngineError::InvalidAttendance {
            days_worked: -1,
            days_in_month: 30,
        };
        assert_eq!(
            error.to_string(),
            "Invalid attendance data: days_worked=-1, days_in_month=30"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "monthly_basic".to_string(),
            message: "must be greater than 0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'monthly_basic': must be greater than 0"
        );
    }

    #[test]
    fn test_validation_failed_displays_count() {
        let error = EngineError::ValidationFailed { error_count: 3 };
        assert_eq!(error.to_string(), "Payroll validation failed with 3 errors");
    }

    #[test]
    fn test_invalid_run_transition_displays_statuses() {
        let error = EngineError::InvalidRunTransition {
            from: "draft".to_string(),
            to: "locked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll run cannot move from 'draft' to 'locked'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_rules() -> EngineResult<()> {
            Err(EngineError::InvalidRuleSet {
                message: "ESI rules not configured".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_rules()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
