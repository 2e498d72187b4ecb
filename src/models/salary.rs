//! Salary profile model and related types.
//!
//! This module defines the [`SalaryProfile`] owned by every employee record,
//! its six named [`SalaryComponent`]s, and the provident fund and
//! professional tax entries derived alongside them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SalaryDefaults;

/// How the employee's wage is expressed. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    /// A fixed monthly wage.
    #[default]
    Fixed,
    /// An hourly wage.
    Hourly,
}

/// How a component's amount is obtained.
///
/// Deserialization only accepts the two known spellings; anything else is
/// a validation error rather than a silent default.
///
/// # Example
///
/// ```
/// use dayflow_hrms::models::ComputationType;
///
/// let parsed: ComputationType = "percentage".parse().unwrap();
/// assert_eq!(parsed, ComputationType::Percentage);
/// assert!("weekly".parse::<ComputationType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ComputationType {
    /// The amount is a percentage of a base (wage or basic salary).
    Percentage,
    /// The amount is authoritative as stored.
    Fixed,
}

impl FromStr for ComputationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(ComputationType::Percentage),
            "fixed" => Ok(ComputationType::Fixed),
            other => Err(format!(
                "unknown computation type '{}', expected 'percentage' or 'fixed'",
                other
            )),
        }
    }
}

impl TryFrom<String> for ComputationType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ComputationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputationType::Percentage => write!(f, "percentage"),
            ComputationType::Fixed => write!(f, "fixed"),
        }
    }
}

/// One named entry of a salary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryComponent {
    /// The computed monthly amount.
    pub amount: Decimal,
    /// The percentage (0-100 scale) applied when percentage-driven.
    pub percentage: Decimal,
    /// Whether the amount is percentage-driven or fixed.
    pub computation_type: ComputationType,
    /// Fixed override amount; only meaningful for the standard allowance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Decimal>,
    /// Human-readable description shown next to the component.
    #[serde(default)]
    pub description: String,
}

impl SalaryComponent {
    /// Creates a component with a zero amount.
    pub fn new(
        percentage: Decimal,
        computation_type: ComputationType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: Decimal::ZERO,
            percentage,
            computation_type,
            fixed_amount: None,
            description: description.into(),
        }
    }

    /// Returns true if the component is percentage-driven.
    pub fn is_percentage(&self) -> bool {
        self.computation_type == ComputationType::Percentage
    }
}

/// Identifies one of the six salary components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Basic salary.
    BasicSalary,
    /// House rent allowance.
    HouseRentAllowance,
    /// Standard allowance.
    StandardAllowance,
    /// Performance bonus.
    PerformanceBonus,
    /// Leave travel allowance.
    LeaveTravelAllowance,
    /// Residual fixed allowance.
    FixedAllowance,
}

impl ComponentKind {
    /// All components in evaluation order.
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::BasicSalary,
        ComponentKind::HouseRentAllowance,
        ComponentKind::StandardAllowance,
        ComponentKind::PerformanceBonus,
        ComponentKind::LeaveTravelAllowance,
        ComponentKind::FixedAllowance,
    ];

    /// The wire key of the component.
    pub fn key(self) -> &'static str {
        match self {
            ComponentKind::BasicSalary => "basicSalary",
            ComponentKind::HouseRentAllowance => "houseRentAllowance",
            ComponentKind::StandardAllowance => "standardAllowance",
            ComponentKind::PerformanceBonus => "performanceBonus",
            ComponentKind::LeaveTravelAllowance => "leaveTravelAllowance",
            ComponentKind::FixedAllowance => "fixedAllowance",
        }
    }

    /// Looks up a component by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The fixed set of six salary components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryComponents {
    /// Basic salary, percentage of the monthly wage.
    pub basic_salary: SalaryComponent,
    /// House rent allowance, percentage of basic salary.
    pub house_rent_allowance: SalaryComponent,
    /// Standard allowance, fixed amount or percentage of the monthly wage.
    pub standard_allowance: SalaryComponent,
    /// Performance bonus, percentage of basic salary.
    pub performance_bonus: SalaryComponent,
    /// Leave travel allowance, percentage of basic salary.
    pub leave_travel_allowance: SalaryComponent,
    /// Residual balancing term.
    pub fixed_allowance: SalaryComponent,
}

impl SalaryComponents {
    /// Returns the component for a kind.
    pub fn get(&self, kind: ComponentKind) -> &SalaryComponent {
        match kind {
            ComponentKind::BasicSalary => &self.basic_salary,
            ComponentKind::HouseRentAllowance => &self.house_rent_allowance,
            ComponentKind::StandardAllowance => &self.standard_allowance,
            ComponentKind::PerformanceBonus => &self.performance_bonus,
            ComponentKind::LeaveTravelAllowance => &self.leave_travel_allowance,
            ComponentKind::FixedAllowance => &self.fixed_allowance,
        }
    }

    /// Returns the component for a kind, mutably.
    pub fn get_mut(&mut self, kind: ComponentKind) -> &mut SalaryComponent {
        match kind {
            ComponentKind::BasicSalary => &mut self.basic_salary,
            ComponentKind::HouseRentAllowance => &mut self.house_rent_allowance,
            ComponentKind::StandardAllowance => &mut self.standard_allowance,
            ComponentKind::PerformanceBonus => &mut self.performance_bonus,
            ComponentKind::LeaveTravelAllowance => &mut self.leave_travel_allowance,
            ComponentKind::FixedAllowance => &mut self.fixed_allowance,
        }
    }

    /// Sum of all six component amounts.
    pub fn total(&self) -> Decimal {
        ComponentKind::ALL
            .iter()
            .map(|kind| self.get(*kind).amount)
            .sum()
    }
}

/// A provident fund contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// The computed monthly amount.
    pub amount: Decimal,
    /// Percentage of basic salary.
    pub percentage: Decimal,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Employee and employer provident fund contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidentFund {
    /// Deducted from the employee.
    pub employee_contribution: Contribution,
    /// Paid by the employer.
    pub employer_contribution: Contribution,
}

/// Flat monthly professional tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalTax {
    /// The flat amount.
    pub amount: Decimal,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// An employee's salary configuration together with its derived amounts.
///
/// Every `amount` field is derived; call
/// [`recompute_salary`](crate::calculation::recompute_salary) after any edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryProfile {
    /// The employee owning this profile.
    pub employee_id: Uuid,
    /// How the wage is expressed.
    #[serde(default)]
    pub wage_type: WageType,
    /// Monthly wage, the base for percentage components.
    pub monthly_wage: Decimal,
    /// Yearly wage, always `monthly_wage * 12`.
    pub yearly_wage: Decimal,
    /// Working days per week.
    pub working_days_per_week: u8,
    /// Unpaid break per working day, in hours.
    pub break_time_hours: Decimal,
    /// The six salary components.
    pub components: SalaryComponents,
    /// Provident fund contributions.
    pub provident_fund: ProvidentFund,
    /// Professional tax.
    pub professional_tax: ProfessionalTax,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When derived values were last recomputed.
    pub updated_at: DateTime<Utc>,
}

impl SalaryProfile {
    /// Creates a zero-wage profile from configured defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use dayflow_hrms::config::SalaryDefaults;
    /// use dayflow_hrms::models::SalaryProfile;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let profile = SalaryProfile::new(Uuid::new_v4(), &SalaryDefaults::default(), Utc::now());
    /// assert_eq!(profile.monthly_wage, Decimal::ZERO);
    /// assert_eq!(profile.components.basic_salary.percentage, Decimal::from(50));
    /// ```
    pub fn new(employee_id: Uuid, defaults: &SalaryDefaults, now: DateTime<Utc>) -> Self {
        let mut standard_allowance = SalaryComponent::new(
            defaults.standard_allowance.percentage,
            defaults.standard_allowance.computation_type,
            "A standard allowance is a predetermined, fixed amount provided to employees as part of their salary",
        );
        standard_allowance.fixed_amount = Some(defaults.standard_allowance_fixed_amount);

        Self {
            employee_id,
            wage_type: WageType::Fixed,
            monthly_wage: Decimal::ZERO,
            yearly_wage: Decimal::ZERO,
            working_days_per_week: defaults.working_days_per_week,
            break_time_hours: defaults.break_time_hours,
            components: SalaryComponents {
                basic_salary: SalaryComponent::new(
                    defaults.basic_salary.percentage,
                    defaults.basic_salary.computation_type,
                    "Basic salary, computed from the monthly wage",
                ),
                house_rent_allowance: SalaryComponent::new(
                    defaults.house_rent_allowance.percentage,
                    defaults.house_rent_allowance.computation_type,
                    "HRA provided to employees as a percentage of the basic salary",
                ),
                standard_allowance,
                performance_bonus: SalaryComponent::new(
                    defaults.performance_bonus.percentage,
                    defaults.performance_bonus.computation_type,
                    "Variable amount paid during payroll, a percentage of the basic salary",
                ),
                leave_travel_allowance: SalaryComponent::new(
                    defaults.leave_travel_allowance.percentage,
                    defaults.leave_travel_allowance.computation_type,
                    "Covers travel expenses, a percentage of the basic salary",
                ),
                fixed_allowance: SalaryComponent::new(
                    Decimal::ZERO,
                    ComputationType::Fixed,
                    "Portion of the wage left after all other components",
                ),
            },
            provident_fund: ProvidentFund {
                employee_contribution: Contribution {
                    amount: Decimal::ZERO,
                    percentage: defaults.provident_fund_employee_percentage,
                    description: "PF is calculated based on the basic salary".to_string(),
                },
                employer_contribution: Contribution {
                    amount: Decimal::ZERO,
                    percentage: defaults.provident_fund_employer_percentage,
                    description: "PF is calculated based on the basic salary".to_string(),
                },
            },
            professional_tax: ProfessionalTax {
                amount: defaults.professional_tax,
                description: "Professional tax deducted from the gross salary".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }
}
