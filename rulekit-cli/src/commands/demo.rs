//! Demo command - demo mode with seeded sample data
//!
//! Demo mode works against its own database file, so real data is never
//! touched.

use anyhow::Result;
use clap::Subcommand;

use rulekit_core::config::Config;

use super::{get_context, get_data_dir};
use crate::output::{success, warning};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode and seed sample data
    On,
    /// Disable demo mode
    Off,
    /// Show whether demo mode is enabled
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    match command.unwrap_or(DemoCommands::Status) {
        DemoCommands::On => on(),
        DemoCommands::Off => off(),
        DemoCommands::Status => status(),
    }
}

fn on() -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let mut config = Config::load(&data_dir)?;
    config.enable_demo_mode();
    config.save(&data_dir)?;

    // Context now opens the demo database
    let ctx = get_context()?;
    match ctx.demo_service.seed() {
        Ok(result) => success(&format!(
            "Demo mode on. Seeded {} accounts, {} budgets, {} rules, {} transactions.",
            result.accounts, result.budgets, result.rules, result.transactions
        )),
        Err(e) => {
            warning(&format!("Demo mode on ({})", e));
        }
    }
    println!("Try: rk run, rk test --description-contains coffee, rk status");
    Ok(())
}

fn off() -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let mut config = Config::load(&data_dir)?;
    config.disable_demo_mode();
    config.save(&data_dir)?;

    success("Demo mode off.");
    Ok(())
}

fn status() -> Result<()> {
    let data_dir = get_data_dir();
    let config = Config::load(&data_dir)?;
    if config.demo_mode {
        println!("Demo mode is on");
    } else {
        println!("Demo mode is off");
    }
    Ok(())
}
