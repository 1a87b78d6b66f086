//! Groups command - organizational rule groups

use anyhow::{Context, Result};
use clap::Subcommand;
use uuid::Uuid;

use super::get_context;
use crate::output::{create_table, success};

#[derive(Subcommand)]
pub enum GroupsCommands {
    /// List all rule groups
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a rule group
    New {
        /// Group name
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a rule group (member rules are kept)
    Rm {
        /// Group ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: Option<GroupsCommands>) -> Result<()> {
    match command.unwrap_or(GroupsCommands::List { json: false }) {
        GroupsCommands::List { json } => list(json),
        GroupsCommands::New { name, description } => new(&name, description),
        GroupsCommands::Rm { id, force } => rm(id, force),
    }
}

fn list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let groups = ctx.group_service.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No rule groups.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Name", "Description", "ID"]);
    for group in &groups {
        table.add_row(vec![
            group.name.clone(),
            group.description.clone().unwrap_or_default(),
            group.id.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn new(name: &str, description: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let group = ctx.group_service.create(name, description)?;
    success(&format!("Created group '{}' ({})", group.name, group.id));
    Ok(())
}

fn rm(id: Uuid, force: bool) -> Result<()> {
    let ctx = get_context()?;
    let group = ctx
        .group_service
        .get(id)?
        .with_context(|| format!("Group {} not found", id))?;

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete group '{}'? Member rules are kept.",
                group.name
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.group_service.delete(id)?;
    success(&format!("Deleted group '{}'", group.name));
    Ok(())
}
