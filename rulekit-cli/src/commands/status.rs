//! Status command - rule and transaction summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output::create_table;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Rulekit Status".bold());
    println!();

    let mut table = create_table();
    table.add_row(vec!["Rules", &status.total_rules.to_string()]);
    table.add_row(vec!["Active rules", &status.active_rules.to_string()]);
    table.add_row(vec!["Rule groups", &status.total_groups.to_string()]);
    table.add_row(vec!["Budgets", &status.total_budgets.to_string()]);
    table.add_row(vec!["Transactions", &status.total_transactions.to_string()]);
    table.add_row(vec![
        "Uncategorized",
        &status.uncategorized_transactions.to_string(),
    ]);
    println!("{}", table);

    if let (Some(earliest), Some(latest)) = (&status.date_range.earliest, &status.date_range.latest)
    {
        println!();
        println!("Date range: {} to {}", earliest, latest);
    }

    Ok(())
}
