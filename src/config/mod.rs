//! Configuration loading and management for the HRMS engine.
//!
//! This module provides functionality to load configuration from YAML files,
//! including salary component defaults, attendance rules, leave allocations
//! and the role capability table.
//!
//! # Example
//!
//! ```no_run
//! use dayflow_hrms::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Default PTO days: {}", config.leave().paid_time_off_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceRules, ComponentDefault, HrmsConfig, LeaveDefaults, SalaryDefaults, ServerConfig,
};
