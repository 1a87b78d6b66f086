//! Store port - persistence abstraction
//!
//! The engine never talks to a database directly; it goes through this
//! trait. Implementations must serialize concurrent mutations of the same
//! transaction (the DuckDB adapter does so with a single connection mutex),
//! which is what keeps an implicit save-trigger run and an overlapping bulk
//! run from losing updates.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, Budget, Rule, RuleGroup, Transaction};

/// Persistence abstraction for rules, groups, transactions, accounts,
/// and budgets
pub trait Store: Send + Sync {
    // === Schema ===

    /// Ensure backing storage exists and is up to date
    fn ensure_schema(&self) -> Result<()>;

    // === Rules ===

    /// Add a new rule
    fn add_rule(&self, rule: &Rule) -> Result<()>;

    /// Get all rules, ordered by priority then name
    fn get_rules(&self) -> Result<Vec<Rule>>;

    /// Get rule by ID
    fn get_rule(&self, id: Uuid) -> Result<Option<Rule>>;

    /// Replace an existing rule
    fn update_rule(&self, rule: &Rule) -> Result<()>;

    /// Delete a rule; returns whether it existed
    fn delete_rule(&self, id: Uuid) -> Result<bool>;

    // === Rule groups ===

    /// Add a new rule group
    fn add_rule_group(&self, group: &RuleGroup) -> Result<()>;

    /// Get all rule groups, ordered by name
    fn get_rule_groups(&self) -> Result<Vec<RuleGroup>>;

    /// Get rule group by ID
    fn get_rule_group(&self, id: Uuid) -> Result<Option<RuleGroup>>;

    /// Replace an existing rule group
    fn update_rule_group(&self, group: &RuleGroup) -> Result<()>;

    /// Delete a rule group; returns whether it existed.
    /// Member rules survive with their `group_id` cleared.
    fn delete_rule_group(&self, id: Uuid) -> Result<bool>;

    /// Clear `group_id` on every rule in the group; returns how many
    /// rules were touched
    fn clear_group_memberships(&self, group_id: Uuid) -> Result<usize>;

    // === Transactions ===

    /// Add a new transaction
    fn add_transaction(&self, tx: &Transaction) -> Result<()>;

    /// Get all transactions, most recent `transaction_date` first
    fn get_transactions(&self) -> Result<Vec<Transaction>>;

    /// Get transactions for one source account, most recent first
    fn get_transactions_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>>;

    /// Get transaction by ID
    fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>>;

    /// Replace an existing transaction
    fn update_transaction(&self, tx: &Transaction) -> Result<()>;

    /// Delete a transaction; returns whether it existed
    fn delete_transaction(&self, id: Uuid) -> Result<bool>;

    /// Total transaction count
    fn count_transactions(&self) -> Result<i64>;

    /// Count of transactions still carrying the default category
    fn count_uncategorized_transactions(&self) -> Result<i64>;

    /// Earliest and latest `transaction_date`, when any exist
    fn transaction_date_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>>;

    // === Accounts ===

    /// Insert or update an account
    fn upsert_account(&self, account: &Account) -> Result<()>;

    /// Get all accounts, ordered by name
    fn get_accounts(&self) -> Result<Vec<Account>>;

    // === Budgets ===

    /// Insert or update a budget
    fn upsert_budget(&self, budget: &Budget) -> Result<()>;

    /// Get all budgets, ordered by name
    fn get_budgets(&self) -> Result<Vec<Budget>>;

    /// The set of budget IDs `set_budget` actions resolve against
    fn budget_ids(&self) -> Result<HashSet<Uuid>>;
}
