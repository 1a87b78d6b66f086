//! Transaction domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single financial transaction
///
/// The rule engine reads every field but only ever rewrites `description`,
/// `category`, `budget_id`, and `destination_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Account the money moved out of
    pub source_account_id: Uuid,
    /// Account the money moved into, when it is one of ours
    pub destination_account_id: Option<Uuid>,
    /// Free-text counterparty when there is no destination account
    pub destination_name: Option<String>,
    pub description: String,
    /// Signed amount (negative = outflow)
    pub amount: Decimal,
    pub category: String,
    pub budget_id: Option<Uuid>,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default category assigned to transactions no rule has touched yet
pub const UNCATEGORIZED: &str = "Uncategorized";

impl Transaction {
    /// Create a new transaction with required fields
    pub fn new(
        id: Uuid,
        source_account_id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        transaction_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_account_id,
            destination_account_id: None,
            destination_name: None,
            description: description.into(),
            amount,
            category: UNCATEGORIZED.to_string(),
            budget_id: None,
            transaction_date,
            created_at: now,
            updated_at: now,
        }
    }
}
