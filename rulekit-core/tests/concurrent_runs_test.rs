//! Concurrent run tests
//!
//! Independent bulk runs may overlap; mutations to the same transaction
//! must serialize so nothing is lost. The DuckDB adapter guarantees this
//! with a single connection mutex; these tests exercise real overlap.

use std::sync::Arc;
use std::thread;

use chrono::Utc;
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

use rulekit_core::adapters::duckdb::DuckDbStore;
use rulekit_core::config::Config;
use rulekit_core::domain::{Rule, RuleAction, RuleCondition, Transaction};
use rulekit_core::ports::Store;
use rulekit_core::services::TransactionDraft;
use rulekit_core::RulekitContext;

fn create_test_context(temp_dir: &TempDir) -> RulekitContext {
    let db_path = temp_dir.path().join("test.duckdb");
    let store = Arc::new(DuckDbStore::new(&db_path).expect("Failed to create store"));
    store.ensure_schema().expect("Failed to initialize schema");
    RulekitContext::with_store(Config::default(), store)
}

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

/// Two simultaneous bulk runs both complete and agree on the final state
#[test]
fn test_concurrent_bulk_runs_are_consistent() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.store.add_rule(&coffee_rule()).unwrap();

    let account = Uuid::new_v4();
    for i in 0..50i64 {
        let tx = Transaction::new(
            Uuid::new_v4(),
            account,
            format!("coffee stop {}", i),
            Decimal::new(-400 - i, 2),
            Utc::now(),
        );
        ctx.store.add_transaction(&tx).unwrap();
    }

    thread::scope(|scope| {
        let a = scope.spawn(|| ctx.runner_service.run_all());
        let b = scope.spawn(|| ctx.runner_service.run_all());

        let summary_a = a.join().unwrap().unwrap();
        let summary_b = b.join().unwrap().unwrap();

        assert_eq!(summary_a.matched, 50);
        assert_eq!(summary_b.matched, 50);
        assert!(summary_a.errors.is_empty());
        assert!(summary_b.errors.is_empty());
    });

    // Every transaction ends up categorized exactly as the rule dictates
    let transactions = ctx.store.get_transactions().unwrap();
    assert_eq!(transactions.len(), 50);
    assert!(transactions.iter().all(|t| t.category == "Dining"));
}

/// A bulk run overlapping per-save triggers leaves every matching
/// transaction categorized
#[test]
fn test_bulk_run_overlapping_save_trigger() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.store.add_rule(&coffee_rule()).unwrap();

    thread::scope(|scope| {
        let bulk = scope.spawn(|| {
            for _ in 0..5 {
                ctx.runner_service.run_all().unwrap();
            }
        });
        let writer = scope.spawn(|| {
            for i in 0..20i64 {
                ctx.transaction_service
                    .create(TransactionDraft {
                        source_account_id: Uuid::new_v4(),
                        description: format!("coffee cart {}", i),
                        amount: Decimal::new(-350, 2),
                        destination_account_id: None,
                        destination_name: None,
                        category: None,
                        budget_id: None,
                        transaction_date: None,
                    })
                    .unwrap();
            }
        });

        bulk.join().unwrap();
        writer.join().unwrap();
    });

    let transactions = ctx.store.get_transactions().unwrap();
    assert_eq!(transactions.len(), 20);
    assert!(transactions.iter().all(|t| t.category == "Dining"));
}
