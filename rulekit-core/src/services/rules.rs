//! Rule service - rule CRUD and validation
//!
//! Validation happens here, synchronously, at create/update time: a rule
//! with no conditions, no actions, a blank name, or an empty payload value
//! is rejected before it can ever reach the runner.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Rule, RuleDetails, RuleDraft, RuleUpdate, DEFAULT_PRIORITY};
use crate::ports::Store;

/// Rule service for rule management
pub struct RuleService {
    store: Arc<dyn Store>,
}

impl RuleService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List all rules in display order (priority, then name)
    ///
    /// Stored rules whose payload no longer decodes are logged and skipped
    /// here; the runner reports them per run.
    pub fn list(&self) -> Result<Vec<RuleDetails>> {
        let rules = self.store.get_rules()?;
        let mut result = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule.details() {
                Ok(details) => result.push(details),
                Err(e) => warn!("rule '{}' does not decode: {}", rule.name, e),
            }
        }
        Ok(result)
    }

    /// Get a rule by ID
    pub fn get(&self, id: Uuid) -> Result<Option<RuleDetails>> {
        match self.store.get_rule(id)? {
            Some(rule) => Ok(Some(rule.details()?)),
            None => Ok(None),
        }
    }

    /// Create a new rule from a validated draft
    pub fn create(&self, draft: RuleDraft) -> Result<RuleDetails> {
        draft.validate()?;

        let now = Utc::now();
        let rule = Rule {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            is_active: draft.is_active,
            priority: draft.priority.unwrap_or(DEFAULT_PRIORITY),
            group_id: draft.group_id,
            conditions_json: serde_json::to_string(&draft.conditions)?,
            actions_json: serde_json::to_string(&draft.actions)?,
            created_at: now,
            updated_at: now,
        };

        self.store.add_rule(&rule)?;
        Ok(rule.details()?)
    }

    /// Update an existing rule; the merged result is re-validated
    pub fn update(&self, id: Uuid, update: RuleUpdate) -> Result<Option<RuleDetails>> {
        let existing = match self.store.get_rule(id)? {
            Some(rule) => rule,
            None => return Ok(None),
        };
        let details = existing.details()?;

        let merged = RuleDraft {
            name: update.name.unwrap_or(details.name),
            description: update.description.or(details.description),
            is_active: update.is_active.unwrap_or(details.is_active),
            priority: Some(update.priority.unwrap_or(details.priority)),
            group_id: update.group_id.unwrap_or(details.group_id),
            conditions: update.conditions.unwrap_or(details.conditions),
            actions: update.actions.unwrap_or(details.actions),
        };
        merged.validate()?;

        let rule = Rule {
            id,
            name: merged.name,
            description: merged.description,
            is_active: merged.is_active,
            priority: merged.priority.unwrap_or(DEFAULT_PRIORITY),
            group_id: merged.group_id,
            conditions_json: serde_json::to_string(&merged.conditions)?,
            actions_json: serde_json::to_string(&merged.actions)?,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.store.update_rule(&rule)?;
        Ok(Some(rule.details()?))
    }

    /// Delete a rule; returns whether it existed
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.store.delete_rule(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::{RuleAction, RuleCondition};

    fn service() -> RuleService {
        RuleService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str) -> RuleDraft {
        RuleDraft {
            name: name.into(),
            description: None,
            is_active: true,
            priority: None,
            group_id: None,
            conditions: vec![RuleCondition::DescriptionContains("coffee".into())],
            actions: vec![RuleAction::SetCategory("Dining".into())],
        }
    }

    #[test]
    fn test_create_assigns_default_priority() {
        let svc = service();
        let created = svc.create(draft("Coffee")).unwrap();
        assert_eq!(created.priority, DEFAULT_PRIORITY);
        assert!(created.is_active);
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let svc = service();
        let mut bad = draft("Coffee");
        bad.actions.clear();
        assert!(svc.create(bad).is_err());
    }

    #[test]
    fn test_update_merges_and_revalidates() {
        let svc = service();
        let created = svc.create(draft("Coffee")).unwrap();

        let updated = svc
            .update(
                created.id,
                RuleUpdate {
                    priority: Some(5),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.priority, 5);
        assert_eq!(updated.name, "Coffee");

        // Emptying the conditions is rejected
        let err = svc.update(
            created.id,
            RuleUpdate {
                conditions: Some(vec![]),
                ..Default::default()
            },
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_update_missing_rule_is_none() {
        let svc = service();
        let result = svc.update(Uuid::new_v4(), RuleUpdate::default()).unwrap();
        assert!(result.is_none());
    }
}
