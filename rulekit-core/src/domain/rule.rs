//! Rule domain model and evaluation logic
//!
//! Conditions and actions are closed sum types carrying typed payloads
//! (`Decimal` for amounts, `Uuid` for identifiers), so a malformed value
//! cannot exist in memory. The stored form keeps the historical JSON shape
//! (`condition_type`/`action_type` + string `value`), which is the durable
//! contract with the rest of the application; conversion happens in serde.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::Transaction;

/// Absolute tolerance for `amount_equals` comparisons
fn amount_tolerance() -> Decimal {
    // 0.005
    Decimal::new(5, 3)
}

// ===========================================================================
// Conditions
// ===========================================================================

/// A single predicate over one transaction field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionRecord", into = "ConditionRecord")]
pub enum RuleCondition {
    /// Description contains the text (case-insensitive)
    DescriptionContains(String),
    /// Description starts with the text (case-insensitive)
    DescriptionStartsWith(String),
    /// Description equals the text (case-insensitive)
    DescriptionEquals(String),
    /// Source account identifier equality
    SourceAccountEquals(Uuid),
    /// Destination account identifier equality; false when absent
    DestinationAccountEquals(Uuid),
    /// Destination name contains the text (case-insensitive); false when absent
    DestinationNameContains(String),
    /// Destination name equals the text (case-insensitive); false when absent
    DestinationNameEquals(String),
    /// Amount strictly greater than the value
    AmountGreaterThan(Decimal),
    /// Amount strictly less than the value
    AmountLessThan(Decimal),
    /// Amount within 0.005 of the value
    AmountEquals(Decimal),
}

impl RuleCondition {
    /// Evaluate this condition against a transaction
    ///
    /// Total over well-formed conditions: always true or false, never an
    /// error. Empty text payloads never match; absent optional fields never
    /// match.
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            Self::DescriptionContains(value) => contains_ci(&tx.description, value),
            Self::DescriptionStartsWith(value) => starts_with_ci(&tx.description, value),
            Self::DescriptionEquals(value) => equals_ci(&tx.description, value),
            Self::SourceAccountEquals(id) => tx.source_account_id == *id,
            Self::DestinationAccountEquals(id) => tx.destination_account_id == Some(*id),
            Self::DestinationNameContains(value) => match &tx.destination_name {
                Some(name) => contains_ci(name, value),
                None => false,
            },
            Self::DestinationNameEquals(value) => match &tx.destination_name {
                Some(name) => equals_ci(name, value),
                None => false,
            },
            Self::AmountGreaterThan(value) => tx.amount > *value,
            Self::AmountLessThan(value) => tx.amount < *value,
            Self::AmountEquals(value) => (tx.amount - *value).abs() <= amount_tolerance(),
        }
    }

    /// Wire name of the condition kind ("description_contains", ...)
    pub fn kind(&self) -> &'static str {
        ConditionType::from(self).as_str()
    }

    /// True when the text payload is empty (rejected at rule creation)
    pub fn payload_is_empty(&self) -> bool {
        match self {
            Self::DescriptionContains(v)
            | Self::DescriptionStartsWith(v)
            | Self::DescriptionEquals(v)
            | Self::DestinationNameContains(v)
            | Self::DestinationNameEquals(v) => v.trim().is_empty(),
            _ => false,
        }
    }
}

/// True when every condition in the set matches the transaction
///
/// Conjunction is order-independent; permuting the set never changes the
/// result.
pub fn conditions_match(conditions: &[RuleCondition], tx: &Transaction) -> bool {
    conditions.iter().all(|c| c.matches(tx))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

fn equals_ci(left: &str, right: &str) -> bool {
    !right.is_empty() && left.to_lowercase() == right.to_lowercase()
}

/// Stored JSON shape of a condition
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConditionRecord {
    condition_type: ConditionType,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConditionType {
    DescriptionContains,
    DescriptionStartsWith,
    DescriptionEquals,
    SourceAccountEquals,
    DestinationAccountEquals,
    DestinationNameContains,
    DestinationNameEquals,
    AmountGreaterThan,
    AmountLessThan,
    AmountEquals,
}

impl ConditionType {
    fn as_str(self) -> &'static str {
        match self {
            Self::DescriptionContains => "description_contains",
            Self::DescriptionStartsWith => "description_starts_with",
            Self::DescriptionEquals => "description_equals",
            Self::SourceAccountEquals => "source_account_equals",
            Self::DestinationAccountEquals => "destination_account_equals",
            Self::DestinationNameContains => "destination_name_contains",
            Self::DestinationNameEquals => "destination_name_equals",
            Self::AmountGreaterThan => "amount_greater_than",
            Self::AmountLessThan => "amount_less_than",
            Self::AmountEquals => "amount_equals",
        }
    }
}

impl From<&RuleCondition> for ConditionType {
    fn from(c: &RuleCondition) -> Self {
        match c {
            RuleCondition::DescriptionContains(_) => Self::DescriptionContains,
            RuleCondition::DescriptionStartsWith(_) => Self::DescriptionStartsWith,
            RuleCondition::DescriptionEquals(_) => Self::DescriptionEquals,
            RuleCondition::SourceAccountEquals(_) => Self::SourceAccountEquals,
            RuleCondition::DestinationAccountEquals(_) => Self::DestinationAccountEquals,
            RuleCondition::DestinationNameContains(_) => Self::DestinationNameContains,
            RuleCondition::DestinationNameEquals(_) => Self::DestinationNameEquals,
            RuleCondition::AmountGreaterThan(_) => Self::AmountGreaterThan,
            RuleCondition::AmountLessThan(_) => Self::AmountLessThan,
            RuleCondition::AmountEquals(_) => Self::AmountEquals,
        }
    }
}

impl From<RuleCondition> for ConditionRecord {
    fn from(c: RuleCondition) -> Self {
        let condition_type = ConditionType::from(&c);
        let value = match c {
            RuleCondition::DescriptionContains(v)
            | RuleCondition::DescriptionStartsWith(v)
            | RuleCondition::DescriptionEquals(v)
            | RuleCondition::DestinationNameContains(v)
            | RuleCondition::DestinationNameEquals(v) => v,
            RuleCondition::SourceAccountEquals(id)
            | RuleCondition::DestinationAccountEquals(id) => id.to_string(),
            RuleCondition::AmountGreaterThan(d)
            | RuleCondition::AmountLessThan(d)
            | RuleCondition::AmountEquals(d) => d.to_string(),
        };
        Self {
            condition_type,
            value,
        }
    }
}

impl TryFrom<ConditionRecord> for RuleCondition {
    type Error = Error;

    fn try_from(record: ConditionRecord) -> Result<Self> {
        let kind = record.condition_type;
        let value = record.value;
        Ok(match kind {
            ConditionType::DescriptionContains => Self::DescriptionContains(value),
            ConditionType::DescriptionStartsWith => Self::DescriptionStartsWith(value),
            ConditionType::DescriptionEquals => Self::DescriptionEquals(value),
            ConditionType::DestinationNameContains => Self::DestinationNameContains(value),
            ConditionType::DestinationNameEquals => Self::DestinationNameEquals(value),
            ConditionType::SourceAccountEquals => Self::SourceAccountEquals(parse_id(kind, &value)?),
            ConditionType::DestinationAccountEquals => {
                Self::DestinationAccountEquals(parse_id(kind, &value)?)
            }
            ConditionType::AmountGreaterThan => Self::AmountGreaterThan(parse_amount(kind, &value)?),
            ConditionType::AmountLessThan => Self::AmountLessThan(parse_amount(kind, &value)?),
            ConditionType::AmountEquals => Self::AmountEquals(parse_amount(kind, &value)?),
        })
    }
}

fn parse_id(kind: ConditionType, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        Error::decode(format!(
            "{}: '{}' is not an account id",
            kind.as_str(),
            value
        ))
    })
}

fn parse_amount(kind: ConditionType, value: &str) -> Result<Decimal> {
    value.trim().parse::<Decimal>().map_err(|_| {
        Error::decode(format!("{}: '{}' is not a number", kind.as_str(), value))
    })
}

// ===========================================================================
// Actions
// ===========================================================================

/// A single field mutation applied when a rule matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ActionRecord", into = "ActionRecord")]
pub enum RuleAction {
    /// Set `transaction.category`
    SetCategory(String),
    /// Set `transaction.budget_id`; must reference an existing budget
    SetBudget(Uuid),
    /// Set `transaction.description`
    SetDescription(String),
    /// Set `transaction.destination_name`
    SetDestinationName(String),
}

impl RuleAction {
    /// Name of the transaction field this action writes
    pub fn target_field(&self) -> &'static str {
        match self {
            Self::SetCategory(_) => "category",
            Self::SetBudget(_) => "budget_id",
            Self::SetDescription(_) => "description",
            Self::SetDestinationName(_) => "destination_name",
        }
    }

    /// True when the text payload is empty (rejected at rule creation)
    pub fn payload_is_empty(&self) -> bool {
        match self {
            Self::SetCategory(v) | Self::SetDescription(v) | Self::SetDestinationName(v) => {
                v.trim().is_empty()
            }
            Self::SetBudget(_) => false,
        }
    }
}

/// Stored JSON shape of an action
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActionRecord {
    action_type: ActionType,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionType {
    SetCategory,
    SetBudget,
    SetDescription,
    SetDestinationName,
}

impl From<RuleAction> for ActionRecord {
    fn from(a: RuleAction) -> Self {
        match a {
            RuleAction::SetCategory(v) => Self {
                action_type: ActionType::SetCategory,
                value: v,
            },
            RuleAction::SetBudget(id) => Self {
                action_type: ActionType::SetBudget,
                value: id.to_string(),
            },
            RuleAction::SetDescription(v) => Self {
                action_type: ActionType::SetDescription,
                value: v,
            },
            RuleAction::SetDestinationName(v) => Self {
                action_type: ActionType::SetDestinationName,
                value: v,
            },
        }
    }
}

impl TryFrom<ActionRecord> for RuleAction {
    type Error = Error;

    fn try_from(record: ActionRecord) -> Result<Self> {
        Ok(match record.action_type {
            ActionType::SetCategory => Self::SetCategory(record.value),
            ActionType::SetDescription => Self::SetDescription(record.value),
            ActionType::SetDestinationName => Self::SetDestinationName(record.value),
            ActionType::SetBudget => {
                let id = Uuid::parse_str(record.value.trim()).map_err(|_| {
                    Error::decode(format!("set_budget: '{}' is not a budget id", record.value))
                })?;
                Self::SetBudget(id)
            }
        })
    }
}

// ===========================================================================
// Action application
// ===========================================================================

/// One recorded field mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Outcome of applying one rule's actions to a transaction
#[derive(Debug, Default)]
pub struct ActionOutcome {
    /// Fields whose value actually changed
    pub changes: Vec<FieldChange>,
    /// Itemized action-resolution failures (unknown budget, ...)
    pub errors: Vec<String>,
}

/// Apply actions to a transaction, in order, recording field-level changes
///
/// Later actions overwrite earlier ones targeting the same field. A
/// `set_budget` whose target is not in `known_budgets` is a no-op recorded
/// in `errors`; the remaining actions still apply. Re-applying the same
/// actions yields an empty change list, which is what makes re-runs safe.
pub fn apply_actions(
    actions: &[RuleAction],
    tx: &mut Transaction,
    known_budgets: &HashSet<Uuid>,
) -> ActionOutcome {
    let mut outcome = ActionOutcome::default();

    for action in actions {
        match action {
            RuleAction::SetCategory(value) => {
                if tx.category != *value {
                    outcome.changes.push(FieldChange {
                        field: action.target_field(),
                        from: Some(tx.category.clone()),
                        to: Some(value.clone()),
                    });
                    tx.category = value.clone();
                }
            }
            RuleAction::SetBudget(id) => {
                if !known_budgets.contains(id) {
                    outcome.errors.push(format!("budget {} does not exist", id));
                    continue;
                }
                if tx.budget_id != Some(*id) {
                    outcome.changes.push(FieldChange {
                        field: action.target_field(),
                        from: tx.budget_id.map(|b| b.to_string()),
                        to: Some(id.to_string()),
                    });
                    tx.budget_id = Some(*id);
                }
            }
            RuleAction::SetDescription(value) => {
                if tx.description != *value {
                    outcome.changes.push(FieldChange {
                        field: action.target_field(),
                        from: Some(tx.description.clone()),
                        to: Some(value.clone()),
                    });
                    tx.description = value.clone();
                }
            }
            RuleAction::SetDestinationName(value) => {
                if tx.destination_name.as_deref() != Some(value) {
                    outcome.changes.push(FieldChange {
                        field: action.target_field(),
                        from: tx.destination_name.clone(),
                        to: Some(value.clone()),
                    });
                    tx.destination_name = Some(value.clone());
                }
            }
        }
    }

    outcome
}

// ===========================================================================
// Rule entity
// ===========================================================================

/// A named, prioritized automation unit as stored
///
/// Conditions and actions persist as JSON columns; [`Rule::details`] decodes
/// them. A stored rule whose payload no longer decodes is skipped by the
/// runner with an itemized error rather than failing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Lower value = evaluated earlier; ties break on created_at, then id
    pub priority: i32,
    pub group_id: Option<Uuid>,
    /// Conditions, serialized as JSON
    pub conditions_json: String,
    /// Actions, serialized as JSON
    pub actions_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Decode the stored conditions
    pub fn conditions(&self) -> Result<Vec<RuleCondition>> {
        Ok(serde_json::from_str(&self.conditions_json)?)
    }

    /// Decode the stored actions
    pub fn actions(&self) -> Result<Vec<RuleAction>> {
        Ok(serde_json::from_str(&self.actions_json)?)
    }

    /// Decode into the display/evaluation form
    pub fn details(&self) -> Result<RuleDetails> {
        Ok(RuleDetails {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
            priority: self.priority,
            group_id: self.group_id,
            conditions: self.conditions()?,
            actions: self.actions()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A rule with decoded conditions and actions
#[derive(Debug, Clone, Serialize)]
pub struct RuleDetails {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub priority: i32,
    pub group_id: Option<Uuid>,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RuleDetails {
    /// True when every condition matches the transaction
    pub fn matches(&self, tx: &Transaction) -> bool {
        conditions_match(&self.conditions, tx)
    }
}

/// Priority assigned when a draft does not specify one
pub const DEFAULT_PRIORITY: i32 = 100;

/// Payload for creating a rule
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub group_id: Option<Uuid>,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
}

fn default_active() -> bool {
    true
}

impl RuleDraft {
    /// Reject drafts that could never evaluate meaningfully
    ///
    /// A persisted rule always has a non-blank name, at least one condition,
    /// at least one action, and no empty text payloads.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("rule name must not be empty"));
        }
        if self.conditions.is_empty() {
            return Err(Error::validation("rule must have at least one condition"));
        }
        if self.actions.is_empty() {
            return Err(Error::validation("rule must have at least one action"));
        }
        if let Some(c) = self.conditions.iter().find(|c| c.payload_is_empty()) {
            return Err(Error::validation(format!(
                "condition {} has an empty value",
                c.kind()
            )));
        }
        if let Some(a) = self.actions.iter().find(|a| a.payload_is_empty()) {
            return Err(Error::validation(format!(
                "action targeting {} has an empty value",
                a.target_field()
            )));
        }
        Ok(())
    }
}

/// Payload for updating a rule; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub group_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub conditions: Option<Vec<RuleCondition>>,
    #[serde(default)]
    pub actions: Option<Vec<RuleAction>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(description: &str, amount: &str) -> Transaction {
        let date = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        Transaction::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            description,
            amount.parse().unwrap(),
            date,
        )
    }

    #[test]
    fn test_description_predicates_are_case_insensitive() {
        let t = tx("Local Coffee Shop", "-4.50");
        assert!(RuleCondition::DescriptionContains("COFFEE".into()).matches(&t));
        assert!(RuleCondition::DescriptionStartsWith("local".into()).matches(&t));
        assert!(RuleCondition::DescriptionEquals("LOCAL coffee SHOP".into()).matches(&t));
        assert!(!RuleCondition::DescriptionContains("tea".into()).matches(&t));
    }

    #[test]
    fn test_empty_text_value_never_matches() {
        let t = tx("anything", "-1.00");
        assert!(!RuleCondition::DescriptionContains(String::new()).matches(&t));
        assert!(!RuleCondition::DescriptionStartsWith(String::new()).matches(&t));
        assert!(!RuleCondition::DescriptionEquals(String::new()).matches(&t));
    }

    #[test]
    fn test_absent_destination_fields_never_match() {
        let t = tx("transfer", "-20.00");
        assert!(!RuleCondition::DestinationAccountEquals(Uuid::new_v4()).matches(&t));
        assert!(!RuleCondition::DestinationNameContains("acme".into()).matches(&t));
        assert!(!RuleCondition::DestinationNameEquals("acme".into()).matches(&t));
    }

    #[test]
    fn test_destination_name_comparison() {
        let mut t = tx("invoice", "-99.00");
        t.destination_name = Some("Acme Corp".into());
        assert!(RuleCondition::DestinationNameContains("acme".into()).matches(&t));
        assert!(RuleCondition::DestinationNameEquals("ACME CORP".into()).matches(&t));
        assert!(!RuleCondition::DestinationNameEquals("Acme".into()).matches(&t));
    }

    #[test]
    fn test_amount_comparisons_are_strict() {
        let exactly = tx("x", "100.00");
        let above = tx("x", "100.01");
        let gt = RuleCondition::AmountGreaterThan("100.00".parse().unwrap());
        assert!(!gt.matches(&exactly));
        assert!(gt.matches(&above));

        let lt = RuleCondition::AmountLessThan("100.00".parse().unwrap());
        assert!(!lt.matches(&exactly));
        assert!(lt.matches(&tx("x", "99.99")));
    }

    #[test]
    fn test_amount_equals_uses_tolerance() {
        let eq = RuleCondition::AmountEquals("100.00".parse().unwrap());
        assert!(eq.matches(&tx("x", "100.00")));
        assert!(eq.matches(&tx("x", "100.004")));
        assert!(!eq.matches(&tx("x", "100.01")));
    }

    #[test]
    fn test_conjunction_is_order_independent() {
        let t = tx("Monthly Rent Payment", "-1500.00");
        let a = RuleCondition::DescriptionContains("rent".into());
        let b = RuleCondition::AmountLessThan("0".parse().unwrap());
        let c = RuleCondition::DescriptionStartsWith("monthly".into());

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let reversed = vec![c, b, a];
        assert_eq!(
            conditions_match(&forward, &t),
            conditions_match(&reversed, &t)
        );
        assert!(conditions_match(&forward, &t));
    }

    #[test]
    fn test_apply_actions_is_idempotent() {
        let budget = Uuid::new_v4();
        let budgets: HashSet<Uuid> = [budget].into_iter().collect();
        let actions = vec![
            RuleAction::SetCategory("Dining".into()),
            RuleAction::SetBudget(budget),
            RuleAction::SetDestinationName("Cafe".into()),
        ];

        let mut t = tx("coffee", "-4.50");
        let first = apply_actions(&actions, &mut t, &budgets);
        assert_eq!(first.changes.len(), 3);
        assert!(first.errors.is_empty());

        let second = apply_actions(&actions, &mut t, &budgets);
        assert!(second.changes.is_empty());
        assert_eq!(t.category, "Dining");
        assert_eq!(t.budget_id, Some(budget));
    }

    #[test]
    fn test_later_action_overwrites_earlier_on_same_field() {
        let actions = vec![
            RuleAction::SetCategory("First".into()),
            RuleAction::SetCategory("Second".into()),
        ];
        let mut t = tx("x", "-1.00");
        let outcome = apply_actions(&actions, &mut t, &HashSet::new());
        assert_eq!(t.category, "Second");
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn test_unknown_budget_is_a_recorded_no_op() {
        let missing = Uuid::new_v4();
        let actions = vec![
            RuleAction::SetBudget(missing),
            RuleAction::SetCategory("Groceries".into()),
        ];
        let mut t = tx("market", "-30.00");
        let outcome = apply_actions(&actions, &mut t, &HashSet::new());

        assert_eq!(t.budget_id, None);
        assert_eq!(t.category, "Groceries");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains(&missing.to_string()));
    }

    #[test]
    fn test_condition_wire_format_round_trips() {
        let c = RuleCondition::AmountGreaterThan("100.00".parse().unwrap());
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(
            json,
            r#"{"condition_type":"amount_greater_than","value":"100.00"}"#
        );
        let back: RuleCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_action_wire_format_round_trips() {
        let a = RuleAction::SetCategory("Dining".into());
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"action_type":"set_category","value":"Dining"}"#);
        let back: RuleAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_non_numeric_amount_fails_decode() {
        let json = r#"{"condition_type":"amount_equals","value":"lots"}"#;
        let err = serde_json::from_str::<RuleCondition>(json).unwrap_err();
        assert!(err.to_string().contains("amount_equals"));
    }

    #[test]
    fn test_draft_validation() {
        let valid = RuleDraft {
            name: "Coffee".into(),
            description: None,
            is_active: true,
            priority: None,
            group_id: None,
            conditions: vec![RuleCondition::DescriptionContains("coffee".into())],
            actions: vec![RuleAction::SetCategory("Dining".into())],
        };
        assert!(valid.validate().is_ok());

        let mut no_conditions = valid.clone();
        no_conditions.conditions.clear();
        assert!(no_conditions.validate().is_err());

        let mut no_actions = valid.clone();
        no_actions.actions.clear();
        assert!(no_actions.validate().is_err());

        let mut blank_name = valid.clone();
        blank_name.name = "  ".into();
        assert!(blank_name.validate().is_err());

        let mut empty_payload = valid.clone();
        empty_payload.actions = vec![RuleAction::SetCategory("".into())];
        assert!(empty_payload.validate().is_err());
    }
}
