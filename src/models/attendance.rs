//! Attendance and fixed-deduction input for one employee and period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days in month assumed when no attendance summary exists.
pub const DEFAULT_DAYS_IN_MONTH: i32 = 30;

/// Attendance for the period plus fixed recoveries to deduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Days actually worked. Must not be negative.
    pub days_worked: i32,
    /// Days absent.
    #[serde(default)]
    pub days_absent: i32,
    /// Days on leave.
    #[serde(default)]
    pub days_leave: i32,
    /// Calendar or payroll days in the month. Must be greater than zero.
    pub days_in_month: i32,
    /// Salary advance recovered this period.
    #[serde(default)]
    pub advance_recovery: Decimal,
    /// Loan instalment recovered this period.
    #[serde(default)]
    pub loan_recovery: Decimal,
    /// Any other approved deduction (including loss of pay).
    #[serde(default)]
    pub other_deductions: Decimal,
}

impl PayrollInput {
    /// Attendance for a fully worked month with no recoveries.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollInput;
    ///
    /// let input = PayrollInput::full_month(30);
    /// assert_eq!(input.days_worked, 30);
    /// assert!(input.is_structurally_valid());
    /// ```
    pub fn full_month(days_in_month: i32) -> Self {
        Self {
            days_worked: days_in_month,
            days_absent: 0,
            days_leave: 0,
            days_in_month,
            advance_recovery: Decimal::ZERO,
            loan_recovery: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Returns true if the input can be fed to a calculator: days worked is
    /// not negative and days in month is positive.
    pub fn is_structurally_valid(&self) -> bool {
        self.days_worked >= 0 && self.days_in_month > 0
    }

    /// Sum of worked, absent and leave days, as `i64`.
    pub fn days_accounted(&self) -> i64 {
        i64::from(self.days_worked) + i64::from(self.days_absent) + i64::from(self.days_leave)
    }
}
