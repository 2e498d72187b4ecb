//! Configuration types for the HRMS engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure has a
//! `Default` reproducing the stock DayFlow policy, so a section may be
//! omitted entirely.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::ComputationType;
use crate::permissions::CapabilityTable;

/// HTTP server settings from `server.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:5000".
    pub bind_address: String,
    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            allowed_origins: vec![],
        }
    }
}

/// Default configuration of one salary component.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ComponentDefault {
    /// Percentage on the 0-100 scale.
    pub percentage: Decimal,
    /// Percentage-driven or fixed.
    pub computation_type: ComputationType,
}

impl ComponentDefault {
    fn percentage(percentage: Decimal) -> Self {
        Self {
            percentage,
            computation_type: ComputationType::Percentage,
        }
    }
}

/// Salary profile defaults from `salary.yaml`.
///
/// Applied when a profile is created lazily for an employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SalaryDefaults {
    /// Basic salary, percentage of the monthly wage.
    pub basic_salary: ComponentDefault,
    /// House rent allowance, percentage of basic salary.
    pub house_rent_allowance: ComponentDefault,
    /// Standard allowance.
    pub standard_allowance: ComponentDefault,
    /// Fixed amount used when the standard allowance is fixed-type.
    pub standard_allowance_fixed_amount: Decimal,
    /// Performance bonus, percentage of basic salary.
    pub performance_bonus: ComponentDefault,
    /// Leave travel allowance, percentage of basic salary.
    pub leave_travel_allowance: ComponentDefault,
    /// Employee PF contribution, percentage of basic salary.
    pub provident_fund_employee_percentage: Decimal,
    /// Employer PF contribution, percentage of basic salary.
    pub provident_fund_employer_percentage: Decimal,
    /// Flat monthly professional tax.
    pub professional_tax: Decimal,
    /// Working days per week.
    pub working_days_per_week: u8,
    /// Unpaid break per working day, in hours.
    pub break_time_hours: Decimal,
}

impl Default for SalaryDefaults {
    fn default() -> Self {
        Self {
            basic_salary: ComponentDefault::percentage(Decimal::from(50)),
            house_rent_allowance: ComponentDefault::percentage(Decimal::from(50)),
            standard_allowance: ComponentDefault {
                percentage: Decimal::new(1667, 2),
                computation_type: ComputationType::Fixed,
            },
            standard_allowance_fixed_amount: Decimal::from(4167),
            performance_bonus: ComponentDefault::percentage(Decimal::new(833, 2)),
            leave_travel_allowance: ComponentDefault::percentage(Decimal::new(833, 2)),
            provident_fund_employee_percentage: Decimal::from(12),
            provident_fund_employer_percentage: Decimal::from(12),
            professional_tax: Decimal::from(200),
            working_days_per_week: 5,
            break_time_hours: Decimal::ONE,
        }
    }
}

/// Attendance rules from `attendance.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttendanceRules {
    /// Hours in a standard working day; work beyond this is extra hours.
    pub standard_work_hours: Decimal,
    /// Break deducted when the employee has no salary profile.
    pub default_break_time_hours: Decimal,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            standard_work_hours: Decimal::from(8),
            default_break_time_hours: Decimal::ONE,
        }
    }
}

/// Yearly leave allocation defaults from `leave.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaveDefaults {
    /// Paid time off days per year.
    pub paid_time_off_days: u32,
    /// Sick leave days per year.
    pub sick_leave_days: u32,
    /// Unpaid leave days per year (tracked, not limited).
    pub unpaid_leave_days: u32,
}

impl Default for LeaveDefaults {
    fn default() -> Self {
        Self {
            paid_time_off_days: 24,
            sick_leave_days: 7,
            unpaid_leave_days: 0,
        }
    }
}

/// The complete HRMS configuration.
#[derive(Debug, Clone, Default)]
pub struct HrmsConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Salary profile defaults.
    pub salary: SalaryDefaults,
    /// Attendance rules.
    pub attendance: AttendanceRules,
    /// Leave allocation defaults.
    pub leave: LeaveDefaults,
    /// Role capability table.
    pub permissions: CapabilityTable,
}
