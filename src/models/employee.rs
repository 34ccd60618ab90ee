//! Employee model and related types.
//!
//! The engine only needs a narrow view of an employee record: identity,
//! employment status, date of joining and whether payment/tax details are on
//! file. The directory that owns the full record lives outside this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed.
    Active,
    /// Temporarily inactive (e.g., sabbatical).
    Inactive,
    /// Has left the organization.
    Left,
}

/// Represents an employee whose payroll is being computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Current employment status.
    pub employment_status: EmploymentStatus,
    /// The date the employee joined the organization.
    pub date_of_joining: NaiveDate,
    /// Bank account number, if on file.
    #[serde(default)]
    pub bank_account_number: Option<String>,
    /// Bank IFSC code, if on file.
    #[serde(default)]
    pub bank_ifsc_code: Option<String>,
    /// Permanent Account Number (personal tax ID), if on file.
    #[serde(default)]
    pub personal_pan: Option<String>,
}

impl Employee {
    /// Creates an active employee with no bank or tax details on file.
    pub fn new(id: impl Into<String>, date_of_joining: NaiveDate) -> Self {
        Self {
            id: id.into(),
            employment_status: EmploymentStatus::Active,
            date_of_joining,
            bank_account_number: None,
            bank_ifsc_code: None,
            personal_pan: None,
        }
    }

    /// Returns true if both the bank account number and IFSC code are on file.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     employment_status: EmploymentStatus::Active,
    ///     date_of_joining: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
    ///     bank_account_number: Some("50100012345678".to_string()),
    ///     bank_ifsc_code: None,
    ///     personal_pan: None,
    /// };
    /// assert!(!employee.has_bank_details());
    /// ```
    pub fn has_bank_details(&self) -> bool {
        is_present(&self.bank_account_number) && is_present(&self.bank_ifsc_code)
    }

    /// Returns true if the personal tax ID is on file.
    pub fn has_tax_id(&self) -> bool {
        is_present(&self.personal_pan)
    }

    /// Returns true if the employee has left the organization.
    pub fn has_left(&self) -> bool {
        self.employment_status == EmploymentStatus::Left
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
