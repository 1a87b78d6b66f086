//! Account domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial account transactions move between
///
/// The engine never mutates accounts; it only compares their identifiers
/// against `source_account_equals` / `destination_account_equals` predicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Free-form type label ("checking", "credit", ...)
    pub account_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            account_type: None,
            created_at: now,
            updated_at: now,
        }
    }
}
