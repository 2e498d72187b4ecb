//! Salary component computation.
//!
//! This module refreshes every derived amount of a [`SalaryProfile`]:
//! the five configured components, the residual fixed allowance and the
//! provident fund contributions. Evaluation order matters because HRA,
//! performance bonus, LTA and PF are all derived from the basic salary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ComponentKind, ComputationType, SalaryComponent,
    SalaryProfile,
};

/// Standard allowance used when a fixed-type standard allowance has no amount.
pub const DEFAULT_STANDARD_ALLOWANCE: Decimal = Decimal::from_parts(4167, 0, 0, false, 0);

/// Largest wage or monetary amount a profile may carry (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0);

/// Largest percentage a component or PF contribution may carry.
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Warning code raised when the other components exceed the monthly wage.
pub const WAGE_OVERCOMMITTED: &str = "WAGE_OVERCOMMITTED";

/// Warning code raised when a negative monthly wage was treated as zero.
pub const NEGATIVE_WAGE_CLAMPED: &str = "NEGATIVE_WAGE_CLAMPED";

/// The result of recomputing a salary profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryComputation {
    /// The profile with every derived field refreshed.
    pub profile: SalaryProfile,
    /// True when the five configured components sum to more than the wage,
    /// in which case the fixed allowance was clamped to zero.
    pub overcommitted: bool,
    /// How far the configured components exceed the wage (zero if not overcommitted).
    pub overcommit_amount: Decimal,
    /// The rules applied, in evaluation order.
    pub audit_trace: AuditTrace,
}

/// Monthly summary figures derived from a computed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTotals {
    /// Sum of all six component amounts.
    pub gross: Decimal,
    /// Employee PF contribution (deducted).
    pub provident_fund_employee: Decimal,
    /// Employer PF contribution (not deducted).
    pub provident_fund_employer: Decimal,
    /// Flat professional tax (deducted).
    pub professional_tax: Decimal,
    /// `gross - provident_fund_employee - professional_tax`.
    pub net: Decimal,
}

impl SalaryTotals {
    /// Rounds every figure to two decimal places for display.
    pub fn rounded(&self) -> Self {
        Self {
            gross: self.gross.round_dp(2),
            provident_fund_employee: self.provident_fund_employee.round_dp(2),
            provident_fund_employer: self.provident_fund_employer.round_dp(2),
            professional_tax: self.professional_tax.round_dp(2),
            net: self.net.round_dp(2),
        }
    }
}

impl SalaryComputation {
    /// Computes the monthly summary figures.
    pub fn totals(&self) -> SalaryTotals {
        let profile = &self.profile;
        let gross = profile.components.total();
        let provident_fund_employee = profile.provident_fund.employee_contribution.amount;
        let professional_tax = profile.professional_tax.amount;

        SalaryTotals {
            gross,
            provident_fund_employee,
            provident_fund_employer: profile.provident_fund.employer_contribution.amount,
            professional_tax,
            net: gross - provident_fund_employee - professional_tax,
        }
    }

    /// [`totals`](Self::totals) rounded to two decimal places.
    pub fn rounded_totals(&self) -> SalaryTotals {
        self.totals().rounded()
    }
}

/// `base * percentage / 100`, unrounded.
fn percentage_of(base: Decimal, percentage: Decimal) -> Decimal {
    base * percentage / Decimal::ONE_HUNDRED
}

fn rule_id(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::BasicSalary => "basic_salary",
        ComponentKind::HouseRentAllowance => "house_rent_allowance",
        ComponentKind::StandardAllowance => "standard_allowance",
        ComponentKind::PerformanceBonus => "performance_bonus",
        ComponentKind::LeaveTravelAllowance => "leave_travel_allowance",
        ComponentKind::FixedAllowance => "fixed_allowance",
    }
}

/// Collects numbered audit steps.
struct StepRecorder {
    steps: Vec<AuditStep>,
}

impl StepRecorder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        component: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            component: component.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Records a component derived as a percentage of `base`, or kept as is.
    fn derive_from(
        &mut self,
        kind: ComponentKind,
        rule_name: &str,
        component: &mut SalaryComponent,
        base_name: &str,
        base: Decimal,
    ) {
        let rule_id = rule_id(kind);
        match component.computation_type {
            ComputationType::Percentage => {
                component.amount = percentage_of(base, component.percentage);
                let mut input = serde_json::json!({
                    "percentage": component.percentage.to_string(),
                    "computation_type": "percentage"
                });
                input[base_name] = serde_json::Value::String(base.to_string());
                self.record(
                    rule_id,
                    rule_name,
                    kind.key(),
                    input,
                    serde_json::json!({ "amount": component.amount.to_string() }),
                    format!(
                        "{}% of {} {} = {}",
                        component.percentage, base_name, base, component.amount
                    ),
                );
            }
            ComputationType::Fixed => {
                self.record(
                    rule_id,
                    rule_name,
                    kind.key(),
                    serde_json::json!({ "computation_type": "fixed" }),
                    serde_json::json!({ "amount": component.amount.to_string() }),
                    format!("Fixed amount {} kept as configured", component.amount),
                );
            }
        }
    }
}

fn invalid(field: String, message: &str) -> HrmsError {
    HrmsError::InvalidProfile {
        field,
        message: message.to_string(),
    }
}

/// Fails unless `0 <= value <= max`.
fn check_range(field: String, value: Decimal, max: Decimal) -> HrmsResult<()> {
    if value < Decimal::ZERO {
        Err(invalid(field, "must not be negative"))
    } else if value > max {
        Err(invalid(field, &format!("must not exceed {}", max)))
    } else {
        Ok(())
    }
}

/// Checks that a profile is structurally usable before computation.
///
/// # Errors
///
/// Returns `InvalidProfile` naming the first offending field when:
/// - the monthly wage exceeds [`MAX_AMOUNT`] in magnitude
/// - a component percentage is negative or above [`MAX_PERCENTAGE`]
/// - a fixed-type component amount or the standard allowance fixed amount
///   is negative or above [`MAX_AMOUNT`]
/// - a PF percentage or the professional tax is out of the same ranges
/// - `workingDaysPerWeek` is outside 1..=7
/// - `breakTimeHours` is outside 0..24
pub fn validate_profile(profile: &SalaryProfile) -> HrmsResult<()> {
    if profile.monthly_wage.abs() > MAX_AMOUNT {
        return Err(invalid(
            "monthlyWage".to_string(),
            &format!("must not exceed {} in magnitude", MAX_AMOUNT),
        ));
    }

    for kind in ComponentKind::ALL {
        let component = profile.components.get(kind);
        check_range(
            format!("components.{}.percentage", kind),
            component.percentage,
            MAX_PERCENTAGE,
        )?;
        if kind != ComponentKind::FixedAllowance
            && component.computation_type == ComputationType::Fixed
        {
            check_range(
                format!("components.{}.amount", kind),
                component.amount,
                MAX_AMOUNT,
            )?;
        }
    }

    if let Some(amount) = profile.components.standard_allowance.fixed_amount {
        check_range(
            "components.standardAllowance.fixedAmount".to_string(),
            amount,
            MAX_AMOUNT,
        )?;
    }

    let pf = &profile.provident_fund;
    check_range(
        "providentFund.employeeContribution.percentage".to_string(),
        pf.employee_contribution.percentage,
        MAX_PERCENTAGE,
    )?;
    check_range(
        "providentFund.employerContribution.percentage".to_string(),
        pf.employer_contribution.percentage,
        MAX_PERCENTAGE,
    )?;

    check_range(
        "professionalTax.amount".to_string(),
        profile.professional_tax.amount,
        MAX_AMOUNT,
    )?;

    if !(1..=7).contains(&profile.working_days_per_week) {
        return Err(invalid(
            "workingDaysPerWeek".to_string(),
            "must be between 1 and 7",
        ));
    }

    if profile.break_time_hours < Decimal::ZERO || profile.break_time_hours >= Decimal::from(24) {
        return Err(invalid(
            "breakTimeHours".to_string(),
            "must be at least 0 and less than 24",
        ));
    }

    Ok(())
}

/// Recomputes every derived amount of a salary profile.
///
/// Evaluation order:
/// 1. Basic salary: percentage of the monthly wage
/// 2. House rent allowance: percentage of basic salary
/// 3. Standard allowance: fixed amount (4167 if unset) or percentage of the monthly wage
/// 4. Performance bonus: percentage of basic salary
/// 5. Leave travel allowance: percentage of basic salary
/// 6. Fixed allowance: `max(0, wage - sum of the five above)`
/// 7. Provident fund: employee and employer percentages of basic salary
///
/// Fixed-type components (other than the standard allowance) keep their
/// stored amount. A negative wage is treated as zero. No intermediate value
/// is rounded.
///
/// The function is pure: the same profile and `computed_at` always produce
/// the same result.
///
/// # Errors
///
/// Returns `InvalidProfile` if [`validate_profile`] rejects the input.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use dayflow_hrms::calculation::recompute_salary;
/// use dayflow_hrms::config::SalaryDefaults;
/// use dayflow_hrms::models::SalaryProfile;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let mut profile = SalaryProfile::new(Uuid::new_v4(), &SalaryDefaults::default(), Utc::now());
/// profile.monthly_wage = Decimal::from(50000);
///
/// let result = recompute_salary(&profile, Utc::now()).unwrap();
/// assert_eq!(result.profile.components.basic_salary.amount, Decimal::from(25000));
/// assert_eq!(result.profile.components.fixed_allowance.amount, Decimal::from(4168));
/// assert!(!result.overcommitted);
/// ```
pub fn recompute_salary(
    profile: &SalaryProfile,
    computed_at: DateTime<Utc>,
) -> HrmsResult<SalaryComputation> {
    validate_profile(profile)?;

    let mut profile = profile.clone();
    let mut recorder = StepRecorder::new();
    let mut warnings = Vec::new();

    let wage = if profile.monthly_wage < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NEGATIVE_WAGE_CLAMPED.to_string(),
            message: format!(
                "Monthly wage {} is negative and was treated as 0",
                profile.monthly_wage
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    } else {
        profile.monthly_wage
    };

    let components = &mut profile.components;

    recorder.derive_from(
        ComponentKind::BasicSalary,
        "Basic Salary",
        &mut components.basic_salary,
        "monthly_wage",
        wage,
    );
    let basic = components.basic_salary.amount;

    recorder.derive_from(
        ComponentKind::HouseRentAllowance,
        "House Rent Allowance",
        &mut components.house_rent_allowance,
        "basic_salary",
        basic,
    );

    let standard = &mut components.standard_allowance;
    match standard.computation_type {
        ComputationType::Fixed => {
            standard.amount = standard.fixed_amount.unwrap_or(DEFAULT_STANDARD_ALLOWANCE);
            recorder.record(
                rule_id(ComponentKind::StandardAllowance),
                "Standard Allowance",
                ComponentKind::StandardAllowance.key(),
                serde_json::json!({
                    "computation_type": "fixed",
                    "fixed_amount": standard.fixed_amount.map(|a| a.to_string())
                }),
                serde_json::json!({ "amount": standard.amount.to_string() }),
                format!("Fixed standard allowance of {}", standard.amount),
            );
        }
        ComputationType::Percentage => {
            recorder.derive_from(
                ComponentKind::StandardAllowance,
                "Standard Allowance",
                standard,
                "monthly_wage",
                wage,
            );
        }
    }

    recorder.derive_from(
        ComponentKind::PerformanceBonus,
        "Performance Bonus",
        &mut components.performance_bonus,
        "basic_salary",
        basic,
    );
    recorder.derive_from(
        ComponentKind::LeaveTravelAllowance,
        "Leave Travel Allowance",
        &mut components.leave_travel_allowance,
        "basic_salary",
        basic,
    );

    let others = components.basic_salary.amount
        + components.house_rent_allowance.amount
        + components.standard_allowance.amount
        + components.performance_bonus.amount
        + components.leave_travel_allowance.amount;

    let residual = wage - others;
    let overcommitted = residual < Decimal::ZERO;
    let overcommit_amount = if overcommitted {
        -residual
    } else {
        Decimal::ZERO
    };

    let fixed = &mut components.fixed_allowance;
    fixed.amount = residual.max(Decimal::ZERO);
    fixed.percentage = if wage > Decimal::ZERO {
        fixed.amount / wage * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    recorder.record(
        rule_id(ComponentKind::FixedAllowance),
        "Fixed Allowance",
        ComponentKind::FixedAllowance.key(),
        serde_json::json!({
            "monthly_wage": wage.to_string(),
            "other_components_total": others.to_string()
        }),
        serde_json::json!({
            "amount": fixed.amount.to_string(),
            "percentage": fixed.percentage.to_string(),
            "overcommitted": overcommitted
        }),
        if overcommitted {
            format!(
                "Other components total {} exceeds wage {} by {}; fixed allowance clamped to 0",
                others, wage, overcommit_amount
            )
        } else {
            format!(
                "Wage {} minus other components {} = {}",
                wage, others, fixed.amount
            )
        },
    );

    if overcommitted {
        warnings.push(AuditWarning {
            code: WAGE_OVERCOMMITTED.to_string(),
            message: format!(
                "Salary components exceed the monthly wage by {}",
                overcommit_amount
            ),
            severity: "high".to_string(),
        });
    }

    let pf = &mut profile.provident_fund;
    pf.employee_contribution.amount = percentage_of(basic, pf.employee_contribution.percentage);
    pf.employer_contribution.amount = percentage_of(basic, pf.employer_contribution.percentage);
    recorder.record(
        "provident_fund",
        "Provident Fund",
        "providentFund",
        serde_json::json!({
            "basic_salary": basic.to_string(),
            "employee_percentage": pf.employee_contribution.percentage.to_string(),
            "employer_percentage": pf.employer_contribution.percentage.to_string()
        }),
        serde_json::json!({
            "employee_amount": pf.employee_contribution.amount.to_string(),
            "employer_amount": pf.employer_contribution.amount.to_string()
        }),
        format!(
            "PF employee {} and employer {} of basic salary {}",
            pf.employee_contribution.amount, pf.employer_contribution.amount, basic
        ),
    );

    profile.updated_at = computed_at;

    Ok(SalaryComputation {
        profile,
        overcommitted,
        overcommit_amount,
        audit_trace: AuditTrace {
            steps: recorder.steps,
            warnings,
        },
    })
}
