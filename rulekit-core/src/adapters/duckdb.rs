//! DuckDB store implementation

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Budget, Rule, RuleGroup, Transaction, UNCATEGORIZED};
use crate::ports::Store;
use crate::services::MigrationService;

/// Maximum number of retries when the database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed store
///
/// All access funnels through one connection behind a mutex, which is also
/// what serializes concurrent mutation attempts on the same transaction
/// when two runs overlap.
pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    /// Open (or create) the database at the given path
    ///
    /// Includes retry logic with exponential backoff for file locking
    /// errors, which can occur when an implicit save-trigger run and a bulk
    /// run start at the same moment from separate processes.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        tracing::warn!(
                            "database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::store(format!("failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Disable extension autoloading; everything needed is statically linked
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }
}

impl Store for DuckDbStore {
    fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        MigrationService::new(&conn)
            .run_pending()
            .map_err(|e| Error::store(e.to_string()))?;
        Ok(())
    }

    // === Rules ===

    fn add_rule(&self, rule: &Rule) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_rules (rule_id, name, description, is_active, priority, group_id,
                                    conditions_json, actions_json, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                rule.id.to_string(),
                rule.name,
                rule.description,
                rule.is_active,
                rule.priority,
                rule.group_id.map(|g| g.to_string()),
                rule.conditions_json,
                rule.actions_json,
                rule.created_at.to_rfc3339(),
                rule.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_rules(&self) -> Result<Vec<Rule>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT rule_id, name, description, is_active, priority, group_id,
                    conditions_json, actions_json, created_at, updated_at
             FROM sys_rules ORDER BY priority ASC, name ASC",
        )?;
        let rows = stmt.query_map([], row_to_rule)?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?);
        }
        Ok(rules)
    }

    fn get_rule(&self, id: Uuid) -> Result<Option<Rule>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT rule_id, name, description, is_active, priority, group_id,
                    conditions_json, actions_json, created_at, updated_at
             FROM sys_rules WHERE rule_id = ?",
        )?;
        let rule = stmt.query_row([id.to_string()], row_to_rule).ok();
        Ok(rule)
    }

    fn update_rule(&self, rule: &Rule) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE sys_rules SET name = ?, description = ?, is_active = ?, priority = ?,
                    group_id = ?, conditions_json = ?, actions_json = ?, updated_at = ?
             WHERE rule_id = ?",
            params![
                rule.name,
                rule.description,
                rule.is_active,
                rule.priority,
                rule.group_id.map(|g| g.to_string()),
                rule.conditions_json,
                rule.actions_json,
                rule.updated_at.to_rfc3339(),
                rule.id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn delete_rule(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM sys_rules WHERE rule_id = ?",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    // === Rule groups ===

    fn add_rule_group(&self, group: &RuleGroup) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_rule_groups (group_id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                group.id.to_string(),
                group.name,
                group.description,
                group.created_at.to_rfc3339(),
                group.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_rule_groups(&self) -> Result<Vec<RuleGroup>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT group_id, name, description, created_at, updated_at
             FROM sys_rule_groups ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], row_to_rule_group)?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row?);
        }
        Ok(groups)
    }

    fn get_rule_group(&self, id: Uuid) -> Result<Option<RuleGroup>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT group_id, name, description, created_at, updated_at
             FROM sys_rule_groups WHERE group_id = ?",
        )?;
        let group = stmt.query_row([id.to_string()], row_to_rule_group).ok();
        Ok(group)
    }

    fn update_rule_group(&self, group: &RuleGroup) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE sys_rule_groups SET name = ?, description = ?, updated_at = ?
             WHERE group_id = ?",
            params![
                group.name,
                group.description,
                group.updated_at.to_rfc3339(),
                group.id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn delete_rule_group(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM sys_rule_groups WHERE group_id = ?",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    fn clear_group_memberships(&self, group_id: Uuid) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE sys_rules SET group_id = NULL WHERE group_id = ?",
            params![group_id.to_string()],
        )?;
        Ok(affected)
    }

    // === Transactions ===

    fn add_transaction(&self, tx: &Transaction) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_transactions (transaction_id, source_account_id, destination_account_id,
                                           destination_name, description, amount, category, budget_id,
                                           transaction_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                tx.id.to_string(),
                tx.source_account_id.to_string(),
                tx.destination_account_id.map(|a| a.to_string()),
                tx.destination_name,
                tx.description,
                decimal_to_f64(tx.amount),
                tx.category,
                tx.budget_id.map(|b| b.to_string()),
                tx.transaction_date.to_rfc3339(),
                tx.created_at.to_rfc3339(),
                tx.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT transaction_id, source_account_id, destination_account_id, destination_name,
                    description, amount, category, budget_id, transaction_date, created_at, updated_at
             FROM sys_transactions ORDER BY transaction_date DESC",
        )?;
        let rows = stmt.query_map([], row_to_transaction)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    fn get_transactions_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT transaction_id, source_account_id, destination_account_id, destination_name,
                    description, amount, category, budget_id, transaction_date, created_at, updated_at
             FROM sys_transactions WHERE source_account_id = ? ORDER BY transaction_date DESC",
        )?;
        let rows = stmt.query_map([account_id.to_string()], row_to_transaction)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT transaction_id, source_account_id, destination_account_id, destination_name,
                    description, amount, category, budget_id, transaction_date, created_at, updated_at
             FROM sys_transactions WHERE transaction_id = ?",
        )?;
        let tx = stmt.query_row([id.to_string()], row_to_transaction).ok();
        Ok(tx)
    }

    fn update_transaction(&self, tx: &Transaction) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE sys_transactions SET source_account_id = ?, destination_account_id = ?,
                    destination_name = ?, description = ?, amount = ?, category = ?, budget_id = ?,
                    transaction_date = ?, updated_at = ?
             WHERE transaction_id = ?",
            params![
                tx.source_account_id.to_string(),
                tx.destination_account_id.map(|a| a.to_string()),
                tx.destination_name,
                tx.description,
                decimal_to_f64(tx.amount),
                tx.category,
                tx.budget_id.map(|b| b.to_string()),
                tx.transaction_date.to_rfc3339(),
                tx.updated_at.to_rfc3339(),
                tx.id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn delete_transaction(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM sys_transactions WHERE transaction_id = ?",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sys_transactions", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    fn count_uncategorized_transactions(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_transactions WHERE category = ?",
            params![UNCATEGORIZED],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn transaction_date_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let conn = self.conn.lock().unwrap();
        let result: (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(transaction_date), MAX(transaction_date) FROM sys_transactions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(match result {
            (Some(min), Some(max)) => Some((parse_timestamp(&min), parse_timestamp(&max))),
            _ => None,
        })
    }

    // === Accounts ===

    fn upsert_account(&self, account: &Account) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_accounts (account_id, name, account_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (account_id) DO UPDATE SET
                name = EXCLUDED.name,
                account_type = COALESCE(EXCLUDED.account_type, sys_accounts.account_type),
                updated_at = EXCLUDED.updated_at",
            params![
                account.id.to_string(),
                account.name,
                account.account_type,
                account.created_at.to_rfc3339(),
                account.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT account_id, name, account_type, created_at, updated_at
             FROM sys_accounts ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], row_to_account)?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }

    // === Budgets ===

    fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sys_budgets (budget_id, name, description, amount, start_date, end_date,
                                      created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (budget_id) DO UPDATE SET
                name = EXCLUDED.name,
                description = COALESCE(EXCLUDED.description, sys_budgets.description),
                amount = EXCLUDED.amount,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                updated_at = EXCLUDED.updated_at",
            params![
                budget.id.to_string(),
                budget.name,
                budget.description,
                decimal_to_f64(budget.amount),
                budget.start_date.to_rfc3339(),
                budget.end_date.map(|d| d.to_rfc3339()),
                budget.created_at.to_rfc3339(),
                budget.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT budget_id, name, description, amount, start_date, end_date, created_at, updated_at
             FROM sys_budgets ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], row_to_budget)?;

        let mut budgets = Vec::new();
        for row in rows {
            budgets.push(row?);
        }
        Ok(budgets)
    }

    fn budget_ids(&self) -> Result<HashSet<Uuid>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT budget_id FROM sys_budgets")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = HashSet::new();
        for row in rows {
            ids.insert(parse_uuid(&row?));
        }
        Ok(ids)
    }
}

// === Row mapping ===

fn row_to_rule(row: &duckdb::Row) -> duckdb::Result<Rule> {
    let id: String = row.get(0)?;
    let group_id: Option<String> = row.get(5)?;
    let created: String = row.get(8)?;
    let updated: String = row.get(9)?;
    Ok(Rule {
        id: parse_uuid(&id),
        name: row.get(1)?,
        description: row.get(2)?,
        is_active: row.get(3)?,
        priority: row.get(4)?,
        group_id: group_id.as_deref().map(parse_uuid),
        conditions_json: row.get(6)?,
        actions_json: row.get(7)?,
        created_at: parse_timestamp(&created),
        updated_at: parse_timestamp(&updated),
    })
}

fn row_to_rule_group(row: &duckdb::Row) -> duckdb::Result<RuleGroup> {
    let id: String = row.get(0)?;
    let created: String = row.get(3)?;
    let updated: String = row.get(4)?;
    Ok(RuleGroup {
        id: parse_uuid(&id),
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_timestamp(&created),
        updated_at: parse_timestamp(&updated),
    })
}

fn row_to_transaction(row: &duckdb::Row) -> duckdb::Result<Transaction> {
    let id: String = row.get(0)?;
    let source: String = row.get(1)?;
    let destination: Option<String> = row.get(2)?;
    let amount: f64 = row.get(5)?;
    let budget_id: Option<String> = row.get(7)?;
    let tx_date: String = row.get(8)?;
    let created: String = row.get(9)?;
    let updated: String = row.get(10)?;
    Ok(Transaction {
        id: parse_uuid(&id),
        source_account_id: parse_uuid(&source),
        destination_account_id: destination.as_deref().map(parse_uuid),
        destination_name: row.get(3)?,
        description: row.get(4)?,
        amount: Decimal::try_from(amount).unwrap_or_default(),
        category: row.get(6)?,
        budget_id: budget_id.as_deref().map(parse_uuid),
        transaction_date: parse_timestamp(&tx_date),
        created_at: parse_timestamp(&created),
        updated_at: parse_timestamp(&updated),
    })
}

fn row_to_budget(row: &duckdb::Row) -> duckdb::Result<Budget> {
    let id: String = row.get(0)?;
    let amount: f64 = row.get(3)?;
    let start: String = row.get(4)?;
    let end: Option<String> = row.get(5)?;
    let created: String = row.get(6)?;
    let updated: String = row.get(7)?;
    Ok(Budget {
        id: parse_uuid(&id),
        name: row.get(1)?,
        description: row.get(2)?,
        amount: Decimal::try_from(amount).unwrap_or_default(),
        start_date: parse_timestamp(&start),
        end_date: end.as_deref().map(parse_timestamp),
        created_at: parse_timestamp(&created),
        updated_at: parse_timestamp(&updated),
    })
}

fn row_to_account(row: &duckdb::Row) -> duckdb::Result<Account> {
    let id: String = row.get(0)?;
    let created: String = row.get(3)?;
    let updated: String = row.get(4)?;
    Ok(Account {
        id: parse_uuid(&id),
        name: row.get(1)?,
        account_type: row.get(2)?,
        created_at: parse_timestamp(&created),
        updated_at: parse_timestamp(&updated),
    })
}

fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s.trim()).unwrap_or_else(|_| Uuid::nil())
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_string().parse::<f64>().unwrap_or(0.0)
}
