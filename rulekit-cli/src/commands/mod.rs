//! CLI command implementations

pub mod demo;
pub mod groups;
pub mod rules;
pub mod run;
pub mod status;
pub mod test;
pub mod txs;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rulekit_core::RulekitContext;

/// Get the rulekit directory from environment or default
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RULEKIT_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".rulekit")
    }
}

/// Get or create rulekit context
pub fn get_context() -> Result<RulekitContext> {
    let data_dir = get_data_dir();

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create rulekit directory: {:?}", data_dir))?;

    RulekitContext::new(&data_dir)
}
