//! Migration service - manages database schema migrations
//!
//! Migrations are SQL files embedded at compile time. Each applied
//! migration is recorded in the sys_migrations table so repeated runs are
//! idempotent.

use std::collections::HashSet;

use anyhow::Result;
use duckdb::Connection;

use crate::migrations::MIGRATIONS;

/// Result of running migrations
#[derive(Debug)]
pub struct MigrationResult {
    /// Names of newly applied migrations
    pub applied: Vec<String>,
    /// Count of migrations that were already applied
    pub already_applied: usize,
}

/// Service for managing database migrations
pub struct MigrationService<'a> {
    conn: &'a Connection,
}

impl<'a> MigrationService<'a> {
    /// Create a new migration service with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Run all pending migrations in name order
    pub fn run_pending(&self) -> Result<MigrationResult> {
        // Bootstrap: the first migration creates sys_migrations itself and
        // uses IF NOT EXISTS, so it is always safe to run.
        self.conn.execute_batch(MIGRATIONS[0].1)?;

        let applied_set = self.applied_names()?;
        let mut newly_applied = Vec::new();

        for (name, sql) in MIGRATIONS.iter() {
            if applied_set.contains(*name) {
                continue;
            }
            if *name != MIGRATIONS[0].0 {
                self.conn.execute_batch(sql)?;
            }
            self.record(name)?;
            newly_applied.push(name.to_string());
        }

        Ok(MigrationResult {
            already_applied: MIGRATIONS.len() - newly_applied.len(),
            applied: newly_applied,
        })
    }

    /// Names of migrations not yet applied
    pub fn get_pending(&self) -> Result<Vec<String>> {
        self.conn.execute_batch(MIGRATIONS[0].1)?;
        let applied = self.applied_names()?;
        Ok(MIGRATIONS
            .iter()
            .filter(|(name, _)| !applied.contains(*name))
            .map(|(name, _)| name.to_string())
            .collect())
    }

    fn applied_names(&self) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT migration_name FROM sys_migrations")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = HashSet::new();
        for name in names {
            result.insert(name?);
        }
        Ok(result)
    }

    fn record(&self, name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sys_migrations (migration_name) VALUES (?)",
            [name],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckdb::Connection;

    #[test]
    fn test_migrations_run_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        let service = MigrationService::new(&conn);

        let result = service.run_pending().unwrap();
        assert_eq!(result.applied.len(), MIGRATIONS.len());
        assert_eq!(result.already_applied, 0);

        // Running again applies nothing
        let result2 = service.run_pending().unwrap();
        assert_eq!(result2.applied.len(), 0);
        assert_eq!(result2.already_applied, MIGRATIONS.len());
    }

    #[test]
    fn test_get_pending_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        let service = MigrationService::new(&conn);

        let pending = service.get_pending().unwrap();
        assert_eq!(pending.len(), MIGRATIONS.len());

        service.run_pending().unwrap();
        assert!(service.get_pending().unwrap().is_empty());
    }
}
