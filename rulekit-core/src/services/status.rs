//! Status service - rule and transaction summaries

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::ports::Store;

/// Status service for summary screens
pub struct StatusService {
    store: Arc<dyn Store>,
}

impl StatusService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get overall status summary
    pub fn get_status(&self) -> Result<StatusSummary> {
        let rules = self.store.get_rules()?;
        let active_rules = rules.iter().filter(|r| r.is_active).count() as i64;
        let groups = self.store.get_rule_groups()?;
        let budgets = self.store.get_budgets()?;
        let total_transactions = self.store.count_transactions()?;
        let uncategorized = self.store.count_uncategorized_transactions()?;
        let range = self.store.transaction_date_range()?;

        Ok(StatusSummary {
            total_rules: rules.len() as i64,
            active_rules,
            total_groups: groups.len() as i64,
            total_budgets: budgets.len() as i64,
            total_transactions,
            uncategorized_transactions: uncategorized,
            date_range: DateRange {
                earliest: range.map(|(min, _)| min.format("%Y-%m-%d").to_string()),
                latest: range.map(|(_, max)| max.format("%Y-%m-%d").to_string()),
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_rules: i64,
    pub active_rules: i64,
    pub total_groups: i64,
    pub total_budgets: i64,
    pub total_transactions: i64,
    pub uncategorized_transactions: i64,
    pub date_range: DateRange,
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}
