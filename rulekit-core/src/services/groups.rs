//! Rule group service - organizational grouping of rules

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::result::Error;
use crate::domain::RuleGroup;
use crate::ports::Store;

/// Rule group service
pub struct RuleGroupService {
    store: Arc<dyn Store>,
}

impl RuleGroupService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List all groups, ordered by name
    pub fn list(&self) -> Result<Vec<RuleGroup>> {
        Ok(self.store.get_rule_groups()?)
    }

    /// Get a group by ID
    pub fn get(&self, id: Uuid) -> Result<Option<RuleGroup>> {
        Ok(self.store.get_rule_group(id)?)
    }

    /// Create a new group
    pub fn create(&self, name: &str, description: Option<String>) -> Result<RuleGroup> {
        if name.trim().is_empty() {
            return Err(Error::validation("group name must not be empty").into());
        }
        let mut group = RuleGroup::new(Uuid::new_v4(), name.trim());
        group.description = description;
        self.store.add_rule_group(&group)?;
        Ok(group)
    }

    /// Rename or re-describe a group
    pub fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<RuleGroup>> {
        let mut group = match self.store.get_rule_group(id)? {
            Some(group) => group,
            None => return Ok(None),
        };
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(Error::validation("group name must not be empty").into());
            }
            group.name = name.trim().to_string();
        }
        if let Some(description) = description {
            group.description = Some(description);
        }
        group.updated_at = Utc::now();
        self.store.update_rule_group(&group)?;
        Ok(Some(group))
    }

    /// Delete a group, keeping its rules
    ///
    /// Member rules survive with their `group_id` cleared; groups are
    /// organizational only and never affect evaluation.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let cleared = self.store.clear_group_memberships(id)?;
        let existed = self.store.delete_rule_group(id)?;
        if existed && cleared > 0 {
            info!("cleared group membership on {} rule(s)", cleared);
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::Rule;

    #[test]
    fn test_delete_clears_membership_and_keeps_rules() {
        let store = Arc::new(MemoryStore::new());
        let svc = RuleGroupService::new(store.clone());

        let group = svc.create("Subscriptions", None).unwrap();

        let now = Utc::now();
        let rule = Rule {
            id: Uuid::new_v4(),
            name: "Streaming".into(),
            description: None,
            is_active: true,
            priority: 50,
            group_id: Some(group.id),
            conditions_json: r#"[{"condition_type":"description_contains","value":"flix"}]"#.into(),
            actions_json: r#"[{"action_type":"set_category","value":"Subscriptions"}]"#.into(),
            created_at: now,
            updated_at: now,
        };
        store.add_rule(&rule).unwrap();

        assert!(svc.delete(group.id).unwrap());

        let survivor = store.get_rule(rule.id).unwrap().unwrap();
        assert_eq!(survivor.group_id, None);
        assert!(svc.get(group.id).unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let svc = RuleGroupService::new(Arc::new(MemoryStore::new()));
        assert!(svc.create("  ", None).is_err());
    }
}
