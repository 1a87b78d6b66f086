//! Run command - apply active rules to all transactions

use anyhow::Result;
use colored::Colorize;
use uuid::Uuid;

use super::get_context;
use crate::output::warning;

pub fn run(rule: Option<Uuid>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let summary = match rule {
        Some(id) => ctx.runner_service.run_rule(id)?,
        None => ctx.runner_service.run_all()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} {}", "✓".green(), summary.message);

    if !summary.errors.is_empty() {
        println!();
        warning(&format!("{} issue(s) during the run:", summary.errors.len()));
        for error in &summary.errors {
            println!("  {}", error);
        }
    }

    Ok(())
}
