//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading HRMS
//! configuration from a directory of YAML files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{HrmsError, HrmsResult};
use crate::permissions::CapabilityTable;

use super::types::{AttendanceRules, HrmsConfig, LeaveDefaults, SalaryDefaults, ServerConfig};

/// Loads and provides access to HRMS configuration.
///
/// # Directory Structure
///
/// Every file is optional; a missing file leaves that section at its
/// built-in default.
/// ```text
/// config/
/// ├── server.yaml       # Bind address and CORS origins
/// ├── salary.yaml       # Salary component defaults
/// ├── attendance.yaml   # Standard day and default break
/// ├── leave.yaml        # Yearly leave allocations
/// └── permissions.yaml  # Role capability table
/// ```
///
/// # Example
///
/// ```no_run
/// use dayflow_hrms::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Binding to {}", loader.server().bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: HrmsConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The directory does not exist (`ConfigNotFound`)
    /// - Any present file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> HrmsResult<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(HrmsError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let config = HrmsConfig {
            server: Self::load_optional::<ServerConfig>(&path.join("server.yaml"))?,
            salary: Self::load_optional::<SalaryDefaults>(&path.join("salary.yaml"))?,
            attendance: Self::load_optional::<AttendanceRules>(&path.join("attendance.yaml"))?,
            leave: Self::load_optional::<LeaveDefaults>(&path.join("leave.yaml"))?,
            permissions: Self::load_optional::<CapabilityTable>(&path.join("permissions.yaml"))?,
        };

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: HrmsConfig) -> Self {
        Self { config }
    }

    /// Loads a YAML file, or the type's default if the file is absent.
    fn load_optional<T: DeserializeOwned + Default>(path: &Path) -> HrmsResult<T> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file absent, using defaults");
            return Ok(T::default());
        }
        Self::load_yaml(path)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: DeserializeOwned>(path: &Path) -> HrmsResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrmsError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrmsError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrmsConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the salary profile defaults.
    pub fn salary(&self) -> &SalaryDefaults {
        &self.config.salary
    }

    /// Returns the attendance rules.
    pub fn attendance(&self) -> &AttendanceRules {
        &self.config.attendance
    }

    /// Returns the leave allocation defaults.
    pub fn leave(&self) -> &LeaveDefaults {
        &self.config.leave
    }

    /// Returns the role capability table.
    pub fn permissions(&self) -> &CapabilityTable {
        &self.config.permissions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileField, Role};
    use crate::permissions::Capability;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dayflow-config-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_repository_config() {
        let result = ConfigLoader::load("./config");
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.salary().standard_allowance_fixed_amount, dec("4167"));
        assert_eq!(loader.salary().performance_bonus.percentage, dec("8.33"));
        assert_eq!(loader.attendance().standard_work_hours, dec("8"));
        assert_eq!(loader.leave().paid_time_off_days, 24);
        assert!(loader.permissions().allows(Role::Admin, Capability::ReviewLeave));
        assert_eq!(loader.permissions(), &CapabilityTable::default());
    }

    #[test]
    fn test_empty_directory_yields_defaults() {
        let dir = scratch_dir();

        let loader = ConfigLoader::load(&dir).unwrap();

        assert_eq!(loader.server().bind_address, "0.0.0.0:5000");
        assert_eq!(loader.leave().sick_leave_days, 7);
        assert_eq!(loader.salary().professional_tax, dec("200"));
        assert!(loader.permissions().can_edit_field(Role::Employee, ProfileField::Phone));
    }

    #[test]
    fn test_partial_file_overrides_section() {
        let dir = scratch_dir();
        fs::write(dir.join("leave.yaml"), "paid_time_off_days: 30\n").unwrap();
        fs::write(dir.join("attendance.yaml"), "standard_work_hours: \"9\"\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();

        assert_eq!(loader.leave().paid_time_off_days, 30);
        assert_eq!(loader.leave().sick_leave_days, 7);
        assert_eq!(loader.attendance().standard_work_hours, dec("9"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/dayflow/config");

        match result {
            Err(HrmsError::ConfigNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_malformed_file_returns_parse_error() {
        let dir = scratch_dir();
        fs::write(dir.join("salary.yaml"), "working_days_per_week: [not, a, number]\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(HrmsError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("salary.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
