//! Core data models for the DayFlow HRMS engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod company;
mod employee;
mod leave;
mod salary;

pub use attendance::{AttendanceRecord, AttendanceStatus, WorkStatus};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use company::Company;
pub use employee::{
    Certification, Employee, Gender, MaritalStatus, ProfileField, ProfileUpdate, Role,
};
pub use leave::{LeaveAllocation, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};
pub use salary::{
    ComponentKind, ComputationType, Contribution, ProfessionalTax, ProvidentFund,
    SalaryComponent, SalaryComponents, SalaryProfile, WageType,
};
