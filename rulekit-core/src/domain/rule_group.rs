//! Rule group domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purely organizational label for rules
///
/// Groups have no effect on evaluation order or semantics; only a rule's
/// `priority` does. Deleting a group clears membership on its rules without
/// deleting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RuleGroup {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}
