//! Rulekit CLI - transaction rules in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{demo, groups, rules, run, status, test, txs};

/// Rulekit - transaction rules in your terminal
#[derive(Parser)]
#[command(name = "rk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show rule and transaction summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage rules
    Rules {
        #[command(subcommand)]
        command: Option<rules::RulesCommands>,
    },

    /// Manage rule groups
    Groups {
        #[command(subcommand)]
        command: Option<groups::GroupsCommands>,
    },

    /// Run active rules over all transactions
    Run {
        /// Run only this rule
        #[arg(long)]
        rule: Option<uuid::Uuid>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview which transactions a condition set would match
    Test(test::TestArgs),

    /// List transactions
    Txs(txs::TxsArgs),

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Rules { command } => rules::run(command),
        Commands::Groups { command } => groups::run(command),
        Commands::Run { rule, json } => run::run(rule, json),
        Commands::Test(args) => test::run(args),
        Commands::Txs(args) => txs::run(args),
        Commands::Demo { command } => demo::run(command),
    }
}
