//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod demo;
mod groups;
pub mod migration;
mod rules;
mod runner;
mod status;
mod tester;
mod transactions;

pub use demo::{DemoSeedResult, DemoService};
pub use groups::RuleGroupService;
pub use migration::{MigrationResult, MigrationService};
pub use rules::RuleService;
pub use runner::{RunSummary, RunnerService};
pub use status::{DateRange, StatusService, StatusSummary};
pub use tester::{ConditionTestService, TestOutcome, SAMPLE_CAP};
pub use transactions::{TransactionDraft, TransactionService, TransactionUpdate};
