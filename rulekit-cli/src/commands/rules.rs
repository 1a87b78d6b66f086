//! Rules command - list, inspect, create, and delete rules

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use uuid::Uuid;

use rulekit_core::domain::{RuleAction, RuleCondition, RuleDraft};

use super::get_context;
use crate::output::{create_table, success};

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List all rules
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one rule with its conditions and actions
    Show {
        /// Rule ID
        id: Uuid,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a rule from a JSON file ("-" reads stdin)
    New {
        /// Path to the rule JSON
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a rule
    Rm {
        /// Rule ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: Option<RulesCommands>) -> Result<()> {
    match command.unwrap_or(RulesCommands::List { json: false }) {
        RulesCommands::List { json } => list(json),
        RulesCommands::Show { id, json } => show(id, json),
        RulesCommands::New { file } => new(&file),
        RulesCommands::Rm { id, force } => rm(id, force),
    }
}

fn list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let rules = ctx.rule_service.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    if rules.is_empty() {
        println!("No rules yet. Create one with: rk rules new --file rule.json");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Priority", "Name", "Active", "Conditions", "Actions", "ID"]);
    for rule in &rules {
        table.add_row(vec![
            rule.priority.to_string(),
            rule.name.clone(),
            if rule.is_active { "yes".into() } else { "no".into() },
            rule.conditions.len().to_string(),
            rule.actions.len().to_string(),
            rule.id.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn show(id: Uuid, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let rule = ctx
        .rule_service
        .get(id)?
        .with_context(|| format!("Rule {} not found", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rule)?);
        return Ok(());
    }

    println!("{} {}", rule.name.bold(), format!("({})", rule.id).dimmed());
    if let Some(description) = &rule.description {
        println!("{}", description);
    }
    println!(
        "Priority {} | {}",
        rule.priority,
        if rule.is_active { "active".green() } else { "inactive".yellow() }
    );
    println!();
    println!("{}", "When all of:".bold());
    for condition in &rule.conditions {
        println!("  - {}", describe_condition(condition));
    }
    println!("{}", "Then:".bold());
    for action in &rule.actions {
        println!("  - {}", describe_action(action));
    }
    Ok(())
}

fn new(file: &PathBuf) -> Result<()> {
    let content = if file.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let draft: RuleDraft = serde_json::from_str(&content).context("Invalid rule JSON")?;

    let ctx = get_context()?;
    let created = ctx.rule_service.create(draft)?;
    success(&format!("Created rule '{}' ({})", created.name, created.id));
    Ok(())
}

fn rm(id: Uuid, force: bool) -> Result<()> {
    let ctx = get_context()?;
    let rule = ctx
        .rule_service
        .get(id)?
        .with_context(|| format!("Rule {} not found", id))?;

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete rule '{}'?", rule.name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.rule_service.delete(id)?;
    success(&format!("Deleted rule '{}'", rule.name));
    Ok(())
}

pub fn describe_condition(condition: &RuleCondition) -> String {
    match condition {
        RuleCondition::DescriptionContains(v) => format!("description contains '{}'", v),
        RuleCondition::DescriptionStartsWith(v) => format!("description starts with '{}'", v),
        RuleCondition::DescriptionEquals(v) => format!("description equals '{}'", v),
        RuleCondition::SourceAccountEquals(id) => format!("source account is {}", id),
        RuleCondition::DestinationAccountEquals(id) => format!("destination account is {}", id),
        RuleCondition::DestinationNameContains(v) => format!("counterparty contains '{}'", v),
        RuleCondition::DestinationNameEquals(v) => format!("counterparty equals '{}'", v),
        RuleCondition::AmountGreaterThan(d) => format!("amount > {}", d),
        RuleCondition::AmountLessThan(d) => format!("amount < {}", d),
        RuleCondition::AmountEquals(d) => format!("amount equals {}", d),
    }
}

pub fn describe_action(action: &RuleAction) -> String {
    match action {
        RuleAction::SetCategory(v) => format!("set category to '{}'", v),
        RuleAction::SetBudget(id) => format!("assign budget {}", id),
        RuleAction::SetDescription(v) => format!("rewrite description to '{}'", v),
        RuleAction::SetDestinationName(v) => format!("set counterparty to '{}'", v),
    }
}
