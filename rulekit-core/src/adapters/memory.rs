//! In-memory store implementation
//!
//! Backs unit tests and embedders that want the engine without a database
//! file. Same ordering contract as the DuckDB adapter.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{Account, Budget, Rule, RuleGroup, Transaction, UNCATEGORIZED};
use crate::ports::Store;

#[derive(Default)]
struct Inner {
    rules: HashMap<Uuid, Rule>,
    groups: HashMap<Uuid, RuleGroup>,
    transactions: HashMap<Uuid, Transaction>,
    accounts: HashMap<Uuid, Account>,
    budgets: HashMap<Uuid, Budget>,
}

/// RwLock-guarded in-memory store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    // === Rules ===

    fn add_rule(&self, rule: &Rule) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .rules
            .insert(rule.id, rule.clone());
        Ok(())
    }

    fn get_rules(&self) -> Result<Vec<Rule>> {
        let inner = self.inner.read().unwrap();
        let mut rules: Vec<Rule> = inner.rules.values().cloned().collect();
        rules.sort_by(|a, b| (a.priority, &a.name).cmp(&(b.priority, &b.name)));
        Ok(rules)
    }

    fn get_rule(&self, id: Uuid) -> Result<Option<Rule>> {
        Ok(self.inner.read().unwrap().rules.get(&id).cloned())
    }

    fn update_rule(&self, rule: &Rule) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.rules.contains_key(&rule.id) {
            inner.rules.insert(rule.id, rule.clone());
        }
        Ok(())
    }

    fn delete_rule(&self, id: Uuid) -> Result<bool> {
        Ok(self.inner.write().unwrap().rules.remove(&id).is_some())
    }

    // === Rule groups ===

    fn add_rule_group(&self, group: &RuleGroup) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .groups
            .insert(group.id, group.clone());
        Ok(())
    }

    fn get_rule_groups(&self) -> Result<Vec<RuleGroup>> {
        let inner = self.inner.read().unwrap();
        let mut groups: Vec<RuleGroup> = inner.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    fn get_rule_group(&self, id: Uuid) -> Result<Option<RuleGroup>> {
        Ok(self.inner.read().unwrap().groups.get(&id).cloned())
    }

    fn update_rule_group(&self, group: &RuleGroup) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.groups.contains_key(&group.id) {
            inner.groups.insert(group.id, group.clone());
        }
        Ok(())
    }

    fn delete_rule_group(&self, id: Uuid) -> Result<bool> {
        Ok(self.inner.write().unwrap().groups.remove(&id).is_some())
    }

    fn clear_group_memberships(&self, group_id: Uuid) -> Result<usize> {
        let mut inner = self.inner.write().unwrap();
        let mut cleared = 0;
        for rule in inner.rules.values_mut() {
            if rule.group_id == Some(group_id) {
                rule.group_id = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    // === Transactions ===

    fn add_transaction(&self, tx: &Transaction) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .transactions
            .insert(tx.id, tx.clone());
        Ok(())
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let inner = self.inner.read().unwrap();
        let mut txs: Vec<Transaction> = inner.transactions.values().cloned().collect();
        txs.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(txs)
    }

    fn get_transactions_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>> {
        let inner = self.inner.read().unwrap();
        let mut txs: Vec<Transaction> = inner
            .transactions
            .values()
            .filter(|t| t.source_account_id == account_id)
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(txs)
    }

    fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        Ok(self.inner.read().unwrap().transactions.get(&id).cloned())
    }

    fn update_transaction(&self, tx: &Transaction) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.transactions.contains_key(&tx.id) {
            inner.transactions.insert(tx.id, tx.clone());
        }
        Ok(())
    }

    fn delete_transaction(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .inner
            .write()
            .unwrap()
            .transactions
            .remove(&id)
            .is_some())
    }

    fn count_transactions(&self) -> Result<i64> {
        Ok(self.inner.read().unwrap().transactions.len() as i64)
    }

    fn count_uncategorized_transactions(&self) -> Result<i64> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .transactions
            .values()
            .filter(|t| t.category == UNCATEGORIZED)
            .count() as i64)
    }

    fn transaction_date_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let inner = self.inner.read().unwrap();
        let earliest = inner.transactions.values().map(|t| t.transaction_date).min();
        let latest = inner.transactions.values().map(|t| t.transaction_date).max();
        Ok(earliest.zip(latest))
    }

    // === Accounts ===

    fn upsert_account(&self, account: &Account) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .accounts
            .insert(account.id, account.clone());
        Ok(())
    }

    fn get_accounts(&self) -> Result<Vec<Account>> {
        let inner = self.inner.read().unwrap();
        let mut accounts: Vec<Account> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    // === Budgets ===

    fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .budgets
            .insert(budget.id, budget.clone());
        Ok(())
    }

    fn get_budgets(&self) -> Result<Vec<Budget>> {
        let inner = self.inner.read().unwrap();
        let mut budgets: Vec<Budget> = inner.budgets.values().cloned().collect();
        budgets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(budgets)
    }

    fn budget_ids(&self) -> Result<HashSet<Uuid>> {
        Ok(self.inner.read().unwrap().budgets.keys().copied().collect())
    }
}
