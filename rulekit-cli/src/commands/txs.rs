//! Txs command - inspect transactions

use anyhow::Result;
use clap::Args;
use uuid::Uuid;

use super::get_context;
use crate::output::create_table;

#[derive(Args)]
pub struct TxsArgs {
    /// Only transactions for this source account
    #[arg(long)]
    account: Option<Uuid>,

    /// Maximum rows to print
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TxsArgs) -> Result<()> {
    let ctx = get_context()?;

    let transactions = match args.account {
        Some(account_id) => ctx.transaction_service.list_by_account(account_id)?,
        None => ctx.transaction_service.list()?,
    };

    if args.json {
        let page: Vec<_> = transactions.iter().take(args.limit).collect();
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Date", "Description", "Amount", "Category", "Counterparty"]);
    for tx in transactions.iter().take(args.limit) {
        table.add_row(vec![
            tx.transaction_date.format("%Y-%m-%d").to_string(),
            tx.description.clone(),
            tx.amount.to_string(),
            tx.category.clone(),
            tx.destination_name.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    if transactions.len() > args.limit {
        println!("Showing {} of {} transactions.", args.limit, transactions.len());
    }

    Ok(())
}
