//! Audit trace models.
//!
//! Every calculation records the rules it applied as a sequence of
//! [`AuditStep`]s, plus any [`AuditWarning`]s raised along the way, so that
//! an administrator can see exactly how a salary breakdown was produced.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use dayflow_hrms::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "basic_salary".to_string(),
///     rule_name: "Basic Salary".to_string(),
///     component: "basicSalary".to_string(),
///     input: serde_json::json!({"monthly_wage": "50000", "percentage": "50"}),
///     output: serde_json::json!({"amount": "25000"}),
///     reasoning: "50% of monthly wage 50000".to_string(),
/// };
/// assert_eq!(step.component, "basicSalary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The component or field the rule wrote to.
    pub component: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}
