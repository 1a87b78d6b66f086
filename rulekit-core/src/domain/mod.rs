//! Core domain entities
//!
//! All business entities are defined here, along with the pure rule
//! evaluation logic - no I/O or external dependencies.

mod account;
mod budget;
pub mod rule;
mod rule_group;
mod transaction;
pub mod result;

pub use account::Account;
pub use budget::Budget;
pub use rule::{
    apply_actions, conditions_match, ActionOutcome, FieldChange, Rule, RuleAction, RuleCondition,
    RuleDetails, RuleDraft, RuleUpdate, DEFAULT_PRIORITY,
};
pub use rule_group::RuleGroup;
pub use transaction::{Transaction, UNCATEGORIZED};
