//! Demo service - seeds deterministic sample data

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::adapters::demo::{
    generate_demo_accounts, generate_demo_budgets, generate_demo_rules,
    generate_demo_transactions,
};
use crate::ports::Store;

/// What a demo seed inserted
#[derive(Debug, Serialize)]
pub struct DemoSeedResult {
    pub accounts: i64,
    pub budgets: i64,
    pub rules: i64,
    pub transactions: i64,
}

/// Demo data seeding service
pub struct DemoService {
    store: Arc<dyn Store>,
}

impl DemoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Seed demo accounts, budgets, rules, and 90 days of transactions
    ///
    /// Refuses to run against a store that already holds transactions, so a
    /// real database cannot be polluted by accident.
    pub fn seed(&self) -> Result<DemoSeedResult> {
        if self.store.count_transactions()? > 0 {
            anyhow::bail!("store already contains transactions; not seeding demo data");
        }

        let accounts = generate_demo_accounts();
        for account in &accounts {
            self.store.upsert_account(account)?;
        }

        let budgets = generate_demo_budgets();
        for budget in &budgets {
            self.store.upsert_budget(budget)?;
        }

        let rules = generate_demo_rules();
        let mut rules_added = 0i64;
        for rule in &rules {
            if self.store.get_rule(rule.id)?.is_none() {
                self.store.add_rule(rule)?;
                rules_added += 1;
            }
        }

        let transactions = generate_demo_transactions();
        for tx in &transactions {
            self.store.add_transaction(tx)?;
        }

        info!(
            "seeded demo data: {} accounts, {} budgets, {} rules, {} transactions",
            accounts.len(),
            budgets.len(),
            rules_added,
            transactions.len()
        );

        Ok(DemoSeedResult {
            accounts: accounts.len() as i64,
            budgets: budgets.len() as i64,
            rules: rules_added,
            transactions: transactions.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    #[test]
    fn test_seed_populates_empty_store() {
        let store = Arc::new(MemoryStore::new());
        let svc = DemoService::new(store.clone());

        let result = svc.seed().unwrap();
        assert!(result.transactions > 0);
        assert_eq!(result.rules, 4);
        assert_eq!(
            store.count_transactions().unwrap(),
            result.transactions
        );
    }

    #[test]
    fn test_seed_refuses_populated_store() {
        let store = Arc::new(MemoryStore::new());
        let svc = DemoService::new(store.clone());
        svc.seed().unwrap();
        assert!(svc.seed().is_err());
    }
}
