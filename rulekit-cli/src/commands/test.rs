//! Test command - preview a condition set against the corpus
//!
//! Each flag adds one condition; all conditions must match (AND). Nothing
//! is mutated.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use uuid::Uuid;

use rulekit_core::domain::RuleCondition;
use rulekit_core::services::SAMPLE_CAP;

use super::get_context;
use crate::output::create_table;

#[derive(Args)]
pub struct TestArgs {
    /// Description contains text (repeatable)
    #[arg(long)]
    description_contains: Vec<String>,

    /// Description starts with text (repeatable)
    #[arg(long)]
    description_starts_with: Vec<String>,

    /// Description equals text (repeatable)
    #[arg(long)]
    description_equals: Vec<String>,

    /// Source account ID equals (repeatable)
    #[arg(long)]
    source_account: Vec<Uuid>,

    /// Destination account ID equals (repeatable)
    #[arg(long)]
    destination_account: Vec<Uuid>,

    /// Counterparty name contains text (repeatable)
    #[arg(long)]
    destination_name_contains: Vec<String>,

    /// Counterparty name equals text (repeatable)
    #[arg(long)]
    destination_name_equals: Vec<String>,

    /// Amount strictly greater than (repeatable)
    #[arg(long)]
    amount_greater_than: Vec<Decimal>,

    /// Amount strictly less than (repeatable)
    #[arg(long)]
    amount_less_than: Vec<Decimal>,

    /// Amount equals, within 0.005 (repeatable)
    #[arg(long)]
    amount_equals: Vec<Decimal>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl TestArgs {
    fn conditions(&self) -> Vec<RuleCondition> {
        let mut conditions = Vec::new();
        for v in &self.description_contains {
            conditions.push(RuleCondition::DescriptionContains(v.clone()));
        }
        for v in &self.description_starts_with {
            conditions.push(RuleCondition::DescriptionStartsWith(v.clone()));
        }
        for v in &self.description_equals {
            conditions.push(RuleCondition::DescriptionEquals(v.clone()));
        }
        for id in &self.source_account {
            conditions.push(RuleCondition::SourceAccountEquals(*id));
        }
        for id in &self.destination_account {
            conditions.push(RuleCondition::DestinationAccountEquals(*id));
        }
        for v in &self.destination_name_contains {
            conditions.push(RuleCondition::DestinationNameContains(v.clone()));
        }
        for v in &self.destination_name_equals {
            conditions.push(RuleCondition::DestinationNameEquals(v.clone()));
        }
        for d in &self.amount_greater_than {
            conditions.push(RuleCondition::AmountGreaterThan(*d));
        }
        for d in &self.amount_less_than {
            conditions.push(RuleCondition::AmountLessThan(*d));
        }
        for d in &self.amount_equals {
            conditions.push(RuleCondition::AmountEquals(*d));
        }
        conditions
    }
}

pub fn run(args: TestArgs) -> Result<()> {
    let conditions = args.conditions();

    let ctx = get_context()?;
    let outcome = ctx.tester_service.test(&conditions)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {} transaction(s) match",
        "✓".green(),
        outcome.total_matches
    );

    if outcome.sample.is_empty() {
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Date", "Description", "Amount", "Category"]);
    for tx in &outcome.sample {
        table.add_row(vec![
            tx.transaction_date.format("%Y-%m-%d").to_string(),
            tx.description.clone(),
            tx.amount.to_string(),
            tx.category.clone(),
        ]);
    }
    println!("{}", table);

    if outcome.total_matches > SAMPLE_CAP {
        println!(
            "Showing the {} most recent of {} matches.",
            SAMPLE_CAP, outcome.total_matches
        );
    }

    Ok(())
}
