//! Budget domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending budget the `set_budget` action can assign transactions to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Total amount allocated to this budget
    pub amount: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(id: Uuid, name: impl Into<String>, amount: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            amount,
            start_date: now,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}
