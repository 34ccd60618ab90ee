//! Per-employee audit trail records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CalculationResult, CalculationStep, ValidationError};

/// Outcome recorded on an audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Validation produced no diagnostics.
    Valid,
    /// Validation produced at least one diagnostic of any severity.
    WithErrors,
}

/// A record of how one employee's payroll was computed and what validation
/// said about it.
///
/// Unlike [`CalculationResult`], a trail carries an identifier and a
/// timestamp, so two trails for the same inputs differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationAuditTrail {
    /// Unique identifier for this trail.
    pub id: Uuid,
    /// The employee the trail is for.
    pub employee_id: String,
    /// The payroll period, e.g. "2024-03".
    pub period: String,
    /// Calculation steps, in the order they were produced.
    pub steps: Vec<CalculationStep>,
    /// Diagnostics from component validation.
    pub validations: Vec<ValidationError>,
    /// Summary status.
    pub status: AuditStatus,
    /// When the trail was recorded.
    pub calculated_at: DateTime<Utc>,
    /// Who or what triggered the calculation.
    pub calculated_by: String,
}

impl CalculationAuditTrail {
    /// Records a trail for a computed result.
    pub fn record(
        employee_id: impl Into<String>,
        period: impl Into<String>,
        result: &CalculationResult,
        validations: Vec<ValidationError>,
        calculated_by: impl Into<String>,
    ) -> Self {
        let status = if validations.is_empty() {
            AuditStatus::Valid
        } else {
            AuditStatus::WithErrors
        };

        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            period: period.into(),
            steps: result.calculations.clone(),
            validations,
            status,
            calculated_at: Utc::now(),
            calculated_by: calculated_by.into(),
        }
    }

    /// Serializes the trail as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
