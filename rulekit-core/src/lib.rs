//! Rulekit Core - Transaction rule engine for personal finance automation
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities and the pure rule evaluation logic
//! - **ports**: Trait definitions for external dependencies (Store)
//! - **services**: Business logic orchestration (rule CRUD, runner, tester)
//! - **adapters**: Concrete implementations (DuckDB, in-memory, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbStore;
use config::Config;
use ports::Store;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{
    Account, Budget, FieldChange, Rule, RuleAction, RuleCondition, RuleDetails, RuleDraft,
    RuleGroup, RuleUpdate, Transaction,
};

/// Main context for Rulekit operations
///
/// This is the primary entry point for all business logic. It holds
/// the store, configuration, and all services.
pub struct RulekitContext {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub rule_service: RuleService,
    pub group_service: RuleGroupService,
    pub transaction_service: TransactionService,
    pub runner_service: Arc<RunnerService>,
    pub tester_service: ConditionTestService,
    pub status_service: StatusService,
    pub demo_service: DemoService,
}

impl RulekitContext {
    /// Create a new Rulekit context over the database in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        // Demo mode works against its own database file
        let db_filename = if config.demo_mode {
            "demo.duckdb"
        } else {
            "rulekit.duckdb"
        };

        let db_path = data_dir.join(db_filename);
        let store: Arc<dyn Store> = Arc::new(DuckDbStore::new(&db_path)?);
        store.ensure_schema()?;

        Ok(Self::with_store(config, store))
    }

    /// Create a context over an existing store (tests, embedding)
    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Self {
        let runner_service = Arc::new(RunnerService::new(Arc::clone(&store)));
        let rule_service = RuleService::new(Arc::clone(&store));
        let group_service = RuleGroupService::new(Arc::clone(&store));
        let transaction_service =
            TransactionService::new(Arc::clone(&store), Arc::clone(&runner_service));
        let tester_service = ConditionTestService::new(Arc::clone(&store));
        let status_service = StatusService::new(Arc::clone(&store));
        let demo_service = DemoService::new(Arc::clone(&store));

        Self {
            config,
            store,
            rule_service,
            group_service,
            transaction_service,
            runner_service,
            tester_service,
            status_service,
            demo_service,
        }
    }
}
