//! Company (tenant) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant of the HRMS. Every employee belongs to exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier for the company.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Short code, unique across companies.
    pub code: String,
    /// When the company was registered.
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Creates a company with a fresh ID. The code is upper-cased.
    pub fn new(name: impl Into<String>, code: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.trim().to_uppercase(),
            created_at: now,
        }
    }
}
