//! Transaction service - transaction CRUD with the post-save rule trigger
//!
//! Creating or updating a transaction runs the active rule set against it
//! before the call returns, so stored transactions always reflect the rules
//! as of save time. This is an explicit call into the runner, not an ambient
//! side effect; bulk re-application after rule edits is a separate,
//! deliberate operation.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::ports::Store;
use crate::services::RunnerService;

/// Payload for creating a transaction
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    pub source_account_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub destination_account_id: Option<Uuid>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub budget_id: Option<Uuid>,
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Payload for updating a transaction; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub destination_account_id: Option<Uuid>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub budget_id: Option<Uuid>,
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Transaction service
pub struct TransactionService {
    store: Arc<dyn Store>,
    runner: Arc<RunnerService>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn Store>, runner: Arc<RunnerService>) -> Self {
        Self { store, runner }
    }

    /// Create a transaction, then apply the active rule set to it
    pub fn create(&self, draft: TransactionDraft) -> Result<Transaction> {
        let mut tx = Transaction::new(
            Uuid::new_v4(),
            draft.source_account_id,
            draft.description,
            draft.amount,
            draft.transaction_date.unwrap_or_else(Utc::now),
        );
        tx.destination_account_id = draft.destination_account_id;
        tx.destination_name = draft.destination_name;
        if let Some(category) = draft.category {
            tx.category = category;
        }
        tx.budget_id = draft.budget_id;

        self.store.add_transaction(&tx)?;
        debug!("created transaction {}", tx.id);

        // Post-save hook: the stored transaction reflects the current rules
        let final_tx = self.runner.apply_to(&tx)?;
        Ok(final_tx)
    }

    /// Update a transaction, then re-apply the active rule set to it
    pub fn update(&self, id: Uuid, update: TransactionUpdate) -> Result<Option<Transaction>> {
        let mut tx = match self.store.get_transaction(id)? {
            Some(tx) => tx,
            None => return Ok(None),
        };

        if let Some(description) = update.description {
            tx.description = description;
        }
        if let Some(amount) = update.amount {
            tx.amount = amount;
        }
        if let Some(destination_account_id) = update.destination_account_id {
            tx.destination_account_id = Some(destination_account_id);
        }
        if let Some(destination_name) = update.destination_name {
            tx.destination_name = Some(destination_name);
        }
        if let Some(category) = update.category {
            tx.category = category;
        }
        if let Some(budget_id) = update.budget_id {
            tx.budget_id = Some(budget_id);
        }
        if let Some(transaction_date) = update.transaction_date {
            tx.transaction_date = transaction_date;
        }
        tx.updated_at = Utc::now();

        self.store.update_transaction(&tx)?;

        let final_tx = self.runner.apply_to(&tx)?;
        Ok(Some(final_tx))
    }

    /// Get a transaction by ID
    pub fn get(&self, id: Uuid) -> Result<Option<Transaction>> {
        Ok(self.store.get_transaction(id)?)
    }

    /// List all transactions, most recent first
    pub fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.store.get_transactions()?)
    }

    /// List transactions for one source account, most recent first
    pub fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>> {
        Ok(self.store.get_transactions_by_account(account_id)?)
    }

    /// Delete a transaction; returns whether it existed
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.store.delete_transaction(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::{Rule, RuleAction, RuleCondition, UNCATEGORIZED};

    fn coffee_rule() -> Rule {
        let now = Utc::now();
        let conditions = vec![RuleCondition::DescriptionContains("coffee".into())];
        let actions = vec![RuleAction::SetCategory("Dining".into())];
        Rule {
            id: Uuid::new_v4(),
            name: "Coffee".into(),
            description: None,
            is_active: true,
            priority: 10,
            group_id: None,
            conditions_json: serde_json::to_string(&conditions).unwrap(),
            actions_json: serde_json::to_string(&actions).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with_rule() -> (Arc<MemoryStore>, TransactionService) {
        let store = Arc::new(MemoryStore::new());
        store.add_rule(&coffee_rule()).unwrap();
        let runner = Arc::new(RunnerService::new(store.clone()));
        let svc = TransactionService::new(store.clone(), runner);
        (store, svc)
    }

    fn draft(description: &str) -> TransactionDraft {
        TransactionDraft {
            source_account_id: Uuid::new_v4(),
            description: description.into(),
            amount: Decimal::new(-450, 2),
            destination_account_id: None,
            destination_name: None,
            category: None,
            budget_id: None,
            transaction_date: None,
        }
    }

    #[test]
    fn test_create_applies_rules_before_returning() {
        let (store, svc) = service_with_rule();
        let created = svc.create(draft("Morning coffee run")).unwrap();

        assert_eq!(created.category, "Dining");
        // And the stored copy agrees
        let stored = store.get_transaction(created.id).unwrap().unwrap();
        assert_eq!(stored.category, "Dining");
    }

    #[test]
    fn test_create_without_match_stays_uncategorized() {
        let (_, svc) = service_with_rule();
        let created = svc.create(draft("Hardware store")).unwrap();
        assert_eq!(created.category, UNCATEGORIZED);
    }

    #[test]
    fn test_update_reapplies_rules() {
        let (store, svc) = service_with_rule();
        let created = svc.create(draft("Hardware store")).unwrap();
        assert_eq!(created.category, UNCATEGORIZED);

        let updated = svc
            .update(
                created.id,
                TransactionUpdate {
                    description: Some("Coffee beans".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.category, "Dining");
        let stored = store.get_transaction(created.id).unwrap().unwrap();
        assert_eq!(stored.category, "Dining");
    }
}
