//! Condition tester - dry-run a condition set against the corpus
//!
//! Evaluates an unsaved conjunction against every transaction without
//! applying anything, for previewing a candidate rule before saving it.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::domain::result::Error;
use crate::domain::{conditions_match, RuleCondition, Transaction};
use crate::ports::Store;

/// Most recent transactions included in the preview
pub const SAMPLE_CAP: usize = 100;

/// Outcome of a condition test
#[derive(Debug, Serialize)]
pub struct TestOutcome {
    /// True total across the corpus, even when the sample is truncated
    pub total_matches: usize,
    /// At most [`SAMPLE_CAP`] matches, most recent transaction_date first
    pub sample: Vec<Transaction>,
}

/// Condition tester service
pub struct ConditionTestService {
    store: Arc<dyn Store>,
}

impl ConditionTestService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Evaluate the conjunction of `conditions` against every transaction
    pub fn test(&self, conditions: &[RuleCondition]) -> Result<TestOutcome> {
        if conditions.is_empty() {
            return Err(Error::validation("at least one condition is required").into());
        }

        // Store contract: most recent transaction_date first
        let transactions = self.store.get_transactions()?;

        let matched: Vec<Transaction> = transactions
            .into_iter()
            .filter(|tx| conditions_match(conditions, tx))
            .collect();

        let total_matches = matched.len();
        let sample: Vec<Transaction> = matched.into_iter().take(SAMPLE_CAP).collect();

        Ok(TestOutcome {
            total_matches,
            sample,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::adapters::memory::MemoryStore;

    #[test]
    fn test_total_exceeds_capped_sample() {
        let store = Arc::new(MemoryStore::new());
        let account = Uuid::new_v4();
        let now = Utc::now();

        for i in 0..150i64 {
            let mut tx = Transaction::new(
                Uuid::new_v4(),
                account,
                format!("payment {}", i),
                Decimal::new(-1000, 2),
                now - Duration::days(i),
            );
            tx.destination_name = Some("Acme Corp".into());
            store.add_transaction(&tx).unwrap();
        }

        let svc = ConditionTestService::new(store);
        let outcome = svc
            .test(&[RuleCondition::DestinationNameEquals("Acme Corp".into())])
            .unwrap();

        assert_eq!(outcome.total_matches, 150);
        assert_eq!(outcome.sample.len(), SAMPLE_CAP);

        // Sample is newest-first
        for pair in outcome.sample.windows(2) {
            assert!(pair[0].transaction_date >= pair[1].transaction_date);
        }
    }

    #[test]
    fn test_empty_condition_set_is_rejected() {
        let svc = ConditionTestService::new(Arc::new(MemoryStore::new()));
        assert!(svc.test(&[]).is_err());
    }

    #[test]
    fn test_count_matches_matcher_semantics() {
        let store = Arc::new(MemoryStore::new());
        let account = Uuid::new_v4();
        let now = Utc::now();

        let mut matching = Transaction::new(
            Uuid::new_v4(),
            account,
            "LOCAL COFFEE SHOP",
            Decimal::new(-475, 2),
            now,
        );
        matching.destination_name = Some("Blue Door".into());
        store.add_transaction(&matching).unwrap();

        let other = Transaction::new(
            Uuid::new_v4(),
            account,
            "GAS STATION",
            Decimal::new(-3000, 2),
            now,
        );
        store.add_transaction(&other).unwrap();

        let svc = ConditionTestService::new(store);
        let outcome = svc
            .test(&[
                RuleCondition::DescriptionContains("coffee".into()),
                RuleCondition::AmountLessThan(Decimal::ZERO),
            ])
            .unwrap();

        assert_eq!(outcome.total_matches, 1);
        assert_eq!(outcome.sample[0].id, matching.id);
    }
}
