//! Partial salary profile updates.
//!
//! A [`SalaryUpdate`] carries only the fields the caller wants to change.
//! [`apply_salary_update`] merges it into an existing profile; the caller
//! then runs [`recompute_salary`](super::recompute_salary) so that no
//! derived amount is ever served stale.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{ComponentKind, ComputationType, SalaryProfile, WageType};

/// Months in a year, used to keep monthly and yearly wage consistent.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Changes to one salary component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentUpdate {
    /// New amount; only kept for fixed-type components.
    pub amount: Option<Decimal>,
    /// New percentage (0-100 scale).
    pub percentage: Option<Decimal>,
    /// New computation type.
    pub computation_type: Option<ComputationType>,
    /// New fixed amount; standard allowance only.
    pub fixed_amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
}

/// Changes to one provident fund contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionUpdate {
    /// New percentage of basic salary.
    pub percentage: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
}

/// Changes to the provident fund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidentFundUpdate {
    /// Employee contribution changes.
    pub employee_contribution: Option<ContributionUpdate>,
    /// Employer contribution changes.
    pub employer_contribution: Option<ContributionUpdate>,
}

/// Changes to the professional tax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalTaxUpdate {
    /// New flat amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
}

/// A partial update of a salary profile.
///
/// Components are keyed by their wire name (`basicSalary`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryUpdate {
    /// New wage type.
    pub wage_type: Option<WageType>,
    /// New monthly wage; the yearly wage follows.
    pub monthly_wage: Option<Decimal>,
    /// New yearly wage; the monthly wage follows.
    pub yearly_wage: Option<Decimal>,
    /// New working days per week.
    pub working_days_per_week: Option<u8>,
    /// New break duration in hours.
    pub break_time_hours: Option<Decimal>,
    /// Per-component changes.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentUpdate>,
    /// Provident fund changes.
    pub provident_fund: Option<ProvidentFundUpdate>,
    /// Professional tax changes.
    pub professional_tax: Option<ProfessionalTaxUpdate>,
}

fn yearly_from(monthly: Decimal) -> HrmsResult<Decimal> {
    monthly
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| HrmsError::InvalidInput {
            field: "monthlyWage".to_string(),
            message: format!("monthly wage {} is too large", monthly),
        })
}

/// Merges a partial update into a copy of `profile`.
///
/// When only `monthlyWage` is given the yearly wage becomes `monthly * 12`;
/// when only `yearlyWage` is given the monthly wage becomes `yearly / 12`.
///
/// # Errors
///
/// - `InvalidInput` if both wages are given and `monthly * 12 != yearly`,
///   or if `monthly * 12` does not fit in a decimal
/// - `InvalidProfile` for an unknown component key, or a `fixedAmount`
///   on any component other than the standard allowance
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dayflow_hrms::calculation::{apply_salary_update, SalaryUpdate};
/// use dayflow_hrms::config::SalaryDefaults;
/// use dayflow_hrms::models::SalaryProfile;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let profile = SalaryProfile::new(Uuid::new_v4(), &SalaryDefaults::default(), Utc::now());
/// let update = SalaryUpdate {
///     yearly_wage: Some(Decimal::from(600000)),
///     ..Default::default()
/// };
///
/// let updated = apply_salary_update(&profile, &update).unwrap();
/// assert_eq!(updated.monthly_wage, Decimal::from(50000));
/// ```
pub fn apply_salary_update(
    profile: &SalaryProfile,
    update: &SalaryUpdate,
) -> HrmsResult<SalaryProfile> {
    let mut profile = profile.clone();

    match (update.monthly_wage, update.yearly_wage) {
        (Some(monthly), Some(yearly)) => {
            if yearly_from(monthly)? != yearly {
                return Err(HrmsError::InvalidInput {
                    field: "yearlyWage".to_string(),
                    message: format!(
                        "yearly wage {} does not match monthly wage {} x 12",
                        yearly, monthly
                    ),
                });
            }
            profile.monthly_wage = monthly;
            profile.yearly_wage = yearly;
        }
        (Some(monthly), None) => {
            profile.monthly_wage = monthly;
            profile.yearly_wage = yearly_from(monthly)?;
        }
        (None, Some(yearly)) => {
            profile.yearly_wage = yearly;
            profile.monthly_wage = yearly / MONTHS_PER_YEAR;
        }
        (None, None) => {}
    }

    if let Some(wage_type) = update.wage_type {
        profile.wage_type = wage_type;
    }
    if let Some(days) = update.working_days_per_week {
        profile.working_days_per_week = days;
    }
    if let Some(hours) = update.break_time_hours {
        profile.break_time_hours = hours;
    }

    for (key, changes) in &update.components {
        let kind = ComponentKind::from_key(key).ok_or_else(|| HrmsError::InvalidProfile {
            field: format!("components.{}", key),
            message: "unknown salary component".to_string(),
        })?;

        if changes.fixed_amount.is_some() && kind != ComponentKind::StandardAllowance {
            return Err(HrmsError::InvalidProfile {
                field: format!("components.{}.fixedAmount", key),
                message: "only the standard allowance has a fixed amount".to_string(),
            });
        }

        let component = profile.components.get_mut(kind);
        if let Some(computation_type) = changes.computation_type {
            component.computation_type = computation_type;
        }
        if let Some(percentage) = changes.percentage {
            component.percentage = percentage;
        }
        if let Some(amount) = changes.amount {
            component.amount = amount;
        }
        if let Some(fixed_amount) = changes.fixed_amount {
            component.fixed_amount = Some(fixed_amount);
        }
        if let Some(description) = &changes.description {
            component.description = description.clone();
        }
    }

    if let Some(pf) = &update.provident_fund {
        let targets = [
            (
                &pf.employee_contribution,
                &mut profile.provident_fund.employee_contribution,
            ),
            (
                &pf.employer_contribution,
                &mut profile.provident_fund.employer_contribution,
            ),
        ];
        for (changes, contribution) in targets {
            let Some(changes) = changes else { continue };
            if let Some(percentage) = changes.percentage {
                contribution.percentage = percentage;
            }
            if let Some(description) = &changes.description {
                contribution.description = description.clone();
            }
        }
    }

    if let Some(tax) = &update.professional_tax {
        if let Some(amount) = tax.amount {
            profile.professional_tax.amount = amount;
        }
        if let Some(description) = &tax.description {
            profile.professional_tax.description = description.clone();
        }
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SalaryDefaults;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_profile() -> SalaryProfile {
        SalaryProfile::new(Uuid::nil(), &SalaryDefaults::default(), Utc::now())
    }

    #[test]
    fn test_monthly_wage_derives_yearly() {
        let update = SalaryUpdate {
            monthly_wage: Some(dec("50000")),
            ..Default::default()
        };

        let profile = apply_salary_update(&create_test_profile(), &update).unwrap();

        assert_eq!(profile.monthly_wage, dec("50000"));
        assert_eq!(profile.yearly_wage, dec("600000"));
    }

    #[test]
    fn test_yearly_wage_derives_monthly() {
        let update = SalaryUpdate {
            yearly_wage: Some(dec("100000")),
            ..Default::default()
        };

        let profile = apply_salary_update(&create_test_profile(), &update).unwrap();

        assert_eq!(profile.yearly_wage, dec("100000"));
        assert_eq!(profile.monthly_wage, dec("100000") / dec("12"));
        assert_eq!(profile.monthly_wage.round_dp(2), dec("8333.33"));
    }

    #[test]
    fn test_consistent_wages_are_accepted() {
        let update = SalaryUpdate {
            monthly_wage: Some(dec("1000")),
            yearly_wage: Some(dec("12000")),
            ..Default::default()
        };

        let profile = apply_salary_update(&create_test_profile(), &update).unwrap();
        assert_eq!(profile.monthly_wage, dec("1000"));
        assert_eq!(profile.yearly_wage, dec("12000"));
    }

    #[test]
    fn test_wage_too_large_for_yearly_is_invalid_input() {
        let update = SalaryUpdate {
            monthly_wage: Some(dec("10000000000000000000000000000")),
            ..Default::default()
        };

        match apply_salary_update(&create_test_profile(), &update) {
            Err(HrmsError::InvalidInput { field, .. }) => assert_eq!(field, "monthlyWage"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_inconsistent_wages_are_rejected() {
        let update = SalaryUpdate {
            monthly_wage: Some(dec("1000")),
            yearly_wage: Some(dec("13000")),
            ..Default::default()
        };

        match apply_salary_update(&create_test_profile(), &update) {
            Err(HrmsError::InvalidInput { field, .. }) => assert_eq!(field, "yearlyWage"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_component_merge_keeps_unspecified_fields() {
        let mut components = BTreeMap::new();
        components.insert(
            "houseRentAllowance".to_string(),
            ComponentUpdate {
                percentage: Some(dec("40")),
                ..Default::default()
            },
        );
        let update = SalaryUpdate {
            components,
            ..Default::default()
        };
        let original = create_test_profile();

        let profile = apply_salary_update(&original, &update).unwrap();

        assert_eq!(profile.components.house_rent_allowance.percentage, dec("40"));
        assert_eq!(
            profile.components.house_rent_allowance.computation_type,
            ComputationType::Percentage
        );
        assert_eq!(
            profile.components.house_rent_allowance.description,
            original.components.house_rent_allowance.description
        );
        assert_eq!(profile.components.basic_salary, original.components.basic_salary);
    }

    #[test]
    fn test_unknown_component_key_is_invalid_profile() {
        let update: SalaryUpdate = serde_json::from_str(
            r#"{"components": {"overtimeAllowance": {"percentage": 5}}}"#,
        )
        .unwrap();

        match apply_salary_update(&create_test_profile(), &update) {
            Err(HrmsError::InvalidProfile { field, .. }) => {
                assert_eq!(field, "components.overtimeAllowance");
            }
            other => panic!("Expected InvalidProfile, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_amount_only_on_standard_allowance() {
        let rejected: SalaryUpdate = serde_json::from_str(
            r#"{"components": {"basicSalary": {"fixedAmount": 100}}}"#,
        )
        .unwrap();
        assert!(matches!(
            apply_salary_update(&create_test_profile(), &rejected),
            Err(HrmsError::InvalidProfile { .. })
        ));

        let accepted: SalaryUpdate = serde_json::from_str(
            r#"{"components": {"standardAllowance": {"fixedAmount": "5000"}}}"#,
        )
        .unwrap();
        let profile = apply_salary_update(&create_test_profile(), &accepted).unwrap();
        assert_eq!(
            profile.components.standard_allowance.fixed_amount,
            Some(dec("5000"))
        );
    }

    #[test]
    fn test_pf_and_tax_updates() {
        let update: SalaryUpdate = serde_json::from_str(
            r#"{
                "providentFund": {"employerContribution": {"percentage": "13.5"}},
                "professionalTax": {"amount": 250}
            }"#,
        )
        .unwrap();

        let profile = apply_salary_update(&create_test_profile(), &update).unwrap();

        assert_eq!(profile.provident_fund.employer_contribution.percentage, dec("13.5"));
        assert_eq!(profile.provident_fund.employee_contribution.percentage, dec("12"));
        assert_eq!(profile.professional_tax.amount, dec("250"));
    }

    #[test]
    fn test_unknown_computation_type_fails_to_deserialize() {
        let result: Result<SalaryUpdate, _> = serde_json::from_str(
            r#"{"components": {"basicSalary": {"computationType": "hourly"}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let original = create_test_profile();
        let profile = apply_salary_update(&original, &SalaryUpdate::default()).unwrap();
        assert_eq!(profile, original);
    }
}
