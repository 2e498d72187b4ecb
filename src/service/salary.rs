//! Salary profile access.
//!
//! Profiles are created from the configured defaults on first access and
//! always served freshly recomputed.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{SalaryComputation, SalaryUpdate, apply_salary_update, recompute_salary};
use crate::config::HrmsConfig;
use crate::error::HrmsResult;
use crate::models::SalaryProfile;
use crate::permissions::Capability;
use crate::store::{Collections, MemoryStore};

use super::{colleague, resolve_actor};

/// Returns the stored profile, creating a zero-wage one from defaults.
pub(crate) fn profile_or_default(
    data: &mut Collections,
    config: &HrmsConfig,
    employee_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<SalaryProfile> {
    if let Some(profile) = data.salaries.get(&employee_id) {
        return Ok(profile.clone());
    }

    let computation = recompute_salary(&SalaryProfile::new(employee_id, &config.salary, now), now)?;
    data.salaries
        .insert(employee_id, computation.profile.clone());
    info!(employee_id = %employee_id, "Created default salary profile");
    Ok(computation.profile)
}

/// Returns an employee's salary breakdown.
///
/// Employees may read their own; reading a colleague's requires
/// `update_salary`.
pub async fn salary_profile(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    employee_id: Uuid,
    now: DateTime<Utc>,
) -> HrmsResult<SalaryComputation> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    colleague(&data, &actor, employee_id)?;
    if actor.id != employee_id {
        config.permissions.require(&actor, Capability::UpdateSalary)?;
    }

    let profile = profile_or_default(&mut data, config, employee_id, now)?;
    recompute_salary(&profile, profile.updated_at)
}

/// Merges a salary update, recomputes every amount and stores the result.
///
/// # Errors
///
/// - `PermissionDenied` without `update_salary`
/// - `EmployeeNotFound` for an employee outside the caller's company
/// - `InvalidInput` / `InvalidProfile` from the merge or the recompute;
///   nothing is stored in that case
pub async fn update_salary(
    store: &MemoryStore,
    config: &HrmsConfig,
    actor_id: Uuid,
    employee_id: Uuid,
    update: &SalaryUpdate,
    now: DateTime<Utc>,
) -> HrmsResult<SalaryComputation> {
    let mut data = store.write().await;
    let actor = resolve_actor(&data, actor_id)?;
    config.permissions.require(&actor, Capability::UpdateSalary)?;
    colleague(&data, &actor, employee_id)?;

    let current = profile_or_default(&mut data, config, employee_id, now)?;
    let merged = apply_salary_update(&current, update)?;
    let computation = recompute_salary(&merged, now)?;

    if computation.overcommitted {
        warn!(
            employee_id = %employee_id,
            overcommit_amount = %computation.overcommit_amount,
            "Salary components exceed the monthly wage"
        );
    }

    data.salaries
        .insert(employee_id, computation.profile.clone());

    info!(
        employee_id = %employee_id,
        updated_by = %actor.id,
        monthly_wage = %computation.profile.monthly_wage,
        "Salary updated"
    );

    Ok(computation)
}
