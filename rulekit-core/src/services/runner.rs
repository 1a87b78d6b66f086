//! Rule runner - drives matching and application across transactions
//!
//! Rules are applied in deterministic order: ascending priority, ties broken
//! by created_at then id. Every matching rule applies, so the last rule in
//! that order wins any field both set. Conditions are evaluated against the
//! transaction as it was loaded; actions accumulate on a working copy that
//! is persisted once at the end when anything changed.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{apply_actions, Rule, RuleDetails, Transaction};
use crate::ports::Store;

/// Summary of one run, shaped for direct display
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub message: String,
    /// Transactions at least one rule matched
    pub matched: i64,
    /// Transactions persisted with at least one field change
    pub mutated: i64,
    /// Itemized diagnostics; the run completes despite them
    pub errors: Vec<String>,
}

/// Rule runner service
pub struct RunnerService {
    store: Arc<dyn Store>,
}

/// Active rules decoded and sorted, ready to apply
struct Prepared {
    rules: Vec<RuleDetails>,
    budgets: HashSet<Uuid>,
    /// Decode failures from stored rules; each skips its rule for the run
    errors: Vec<String>,
}

/// Result of applying a prepared rule set to one transaction
struct Applied {
    transaction: Transaction,
    matched: bool,
    changed: bool,
    errors: Vec<String>,
}

impl RunnerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Run every active rule over every transaction
    pub fn run_all(&self) -> Result<RunSummary> {
        let rules = self.store.get_rules()?;
        let prepared = self.prepare(rules)?;
        let transactions = self.store.get_transactions()?;
        Ok(self.execute(prepared, transactions))
    }

    /// Run one rule (by id) over every transaction
    ///
    /// An inactive rule yields an empty summary rather than an error, so
    /// "run this rule" on a disabled rule is a visible no-op.
    pub fn run_rule(&self, id: Uuid) -> Result<RunSummary> {
        let rule = self
            .store
            .get_rule(id)?
            .ok_or_else(|| anyhow::anyhow!("Rule {} not found", id))?;

        if !rule.is_active {
            info!("rule '{}' is not active, nothing to run", rule.name);
            return Ok(RunSummary {
                message: format!("Rule '{}' is inactive; no transactions affected", rule.name),
                matched: 0,
                mutated: 0,
                errors: Vec::new(),
            });
        }

        let prepared = self.prepare(vec![rule])?;
        let transactions = self.store.get_transactions()?;
        Ok(self.execute(prepared, transactions))
    }

    /// Apply the active rule set to one just-saved transaction
    ///
    /// This is the explicit post-save hook the transaction service calls so
    /// stored transactions always reflect the rule set at save time. The
    /// mutated transaction is persisted here when anything changed; the
    /// final form is returned either way.
    pub fn apply_to(&self, tx: &Transaction) -> Result<Transaction> {
        let rules = self.store.get_rules()?;
        let prepared = self.prepare(rules)?;

        let applied = apply_prepared(&prepared, tx);
        for error in &applied.errors {
            warn!("{}", error);
        }

        if applied.changed {
            let mut final_tx = applied.transaction;
            final_tx.updated_at = chrono::Utc::now();
            self.store.update_transaction(&final_tx)?;
            debug!("applied rules to transaction {}", final_tx.id);
            return Ok(final_tx);
        }
        Ok(applied.transaction)
    }

    /// Filter to active rules, sort deterministically, decode payloads
    fn prepare(&self, rules: Vec<Rule>) -> Result<Prepared> {
        let mut active: Vec<Rule> = rules.into_iter().filter(|r| r.is_active).collect();
        active.sort_by(|a, b| {
            (a.priority, a.created_at, a.id).cmp(&(b.priority, b.created_at, b.id))
        });

        let budgets = self.store.budget_ids()?;

        let mut decoded = Vec::with_capacity(active.len());
        let mut errors = Vec::new();
        for rule in &active {
            match rule.details() {
                Ok(details) => decoded.push(details),
                Err(e) => {
                    warn!("skipping rule '{}': {}", rule.name, e);
                    errors.push(format!("rule '{}' skipped: {}", rule.name, e));
                }
            }
        }

        Ok(Prepared {
            rules: decoded,
            budgets,
            errors,
        })
    }

    fn execute(&self, prepared: Prepared, transactions: Vec<Transaction>) -> RunSummary {
        let total = transactions.len();
        let mut matched = 0i64;
        let mut mutated = 0i64;
        let mut errors = prepared.errors.clone();

        for (index, tx) in transactions.iter().enumerate() {
            let applied = apply_prepared(&prepared, tx);
            errors.extend(applied.errors);

            if applied.matched {
                matched += 1;
            }
            if !applied.changed {
                continue;
            }

            let mut final_tx = applied.transaction;
            final_tx.updated_at = chrono::Utc::now();
            if let Err(e) = self.store.update_transaction(&final_tx) {
                // Fatal: stop here, keep what was already persisted, report
                // the partial tally.
                errors.push(format!(
                    "store failure while saving transaction {}: {}",
                    final_tx.id, e
                ));
                let message = format!(
                    "Run aborted after {} of {} transactions: {} matched, {} updated",
                    index + 1,
                    total,
                    matched,
                    mutated
                );
                return RunSummary {
                    message,
                    matched,
                    mutated,
                    errors,
                };
            }
            mutated += 1;
        }

        let message = format!(
            "{} of {} transactions matched, {} updated",
            matched, total, mutated
        );
        info!(
            "rule run complete: {} ({} errors)",
            message,
            errors.len()
        );
        RunSummary {
            message,
            matched,
            mutated,
            errors,
        }
    }
}

/// Apply a prepared rule set to one transaction
///
/// Conditions are evaluated against the transaction as loaded; actions
/// accumulate on the working copy, so within a run a later rule's actions
/// overwrite an earlier rule's on the same field.
fn apply_prepared(prepared: &Prepared, tx: &Transaction) -> Applied {
    let mut working = tx.clone();
    let mut matched = false;
    let mut changed = false;
    let mut errors = Vec::new();

    for rule in &prepared.rules {
        if !rule.matches(tx) {
            continue;
        }
        matched = true;
        debug!("rule '{}' matched transaction {}", rule.name, tx.id);

        let outcome = apply_actions(&rule.actions, &mut working, &prepared.budgets);
        if !outcome.changes.is_empty() {
            changed = true;
        }
        for error in outcome.errors {
            errors.push(format!("rule '{}': {}", rule.name, error));
        }
    }

    Applied {
        transaction: working,
        matched,
        changed,
        errors,
    }
}
