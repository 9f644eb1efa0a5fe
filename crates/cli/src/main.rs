//! Shopping list CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! sl-cli migrate run
//!
//! # Show which migrations are applied
//! sl-cli migrate status
//!
//! # Create a demo list owned by user-123
//! sl-cli seed --owner user-123
//! ```
//!
//! The connection string comes from `SHOPPING_LIST_DATABASE_URL`, falling
//! back to `DATABASE_URL`; a `.env` file is honoured.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(author, version, about = "Shopping list CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Insert a demo shopping list
    Seed {
        /// User id that will own the list
        #[arg(short, long, default_value = shopping_list_api::config::DEFAULT_MOCK_USER_ID)]
        owner: String,

        /// Extra member user ids
        #[arg(short, long)]
        member: Vec<String>,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Run,
    /// List known migrations and whether each is applied
    Status,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await?,
            MigrateAction::Status => commands::migrate::status().await?,
        },
        Commands::Seed { owner, member } => commands::seed::demo_list(&owner, &member).await?,
    }
    Ok(())
}
