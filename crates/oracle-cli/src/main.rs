//! Oracle CLI - inspect data requests, size stakes and read node state.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{balance, check_config, inspect, requests, stake_amount};

#[derive(Parser)]
#[command(name = "oracle")]
#[command(about = "Oracle node request inspection and state CLI")]
struct Cli {
    /// Log filter, e.g. "debug" or "oracle_store=debug"
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the lifecycle predicates of a request
    Inspect {
        /// Path to a data request JSON document
        request: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Evaluate at this RFC 3339 time instead of now
        #[arg(long)]
        now: Option<String>,
    },
    /// Compute the stake this node would place on a request
    StakeAmount {
        /// Path to a data request JSON document
        request: String,
        /// Available balance in base units
        #[arg(long)]
        balance: String,
        /// Largest single stake in base units
        #[arg(long)]
        max: String,
        /// Fraction of the balance staked when it cannot cover the bond
        #[arg(long, default_value = "1")]
        divider: String,
    },
    /// Show a stored ledger
    Balance {
        /// Path to the store journal
        #[arg(long)]
        store: String,
        /// Ledger key
        #[arg(long)]
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List stored data requests
    Requests {
        /// Path to the store journal
        #[arg(long)]
        store: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a node configuration file
    CheckConfig {
        /// Path to the TOML configuration
        config: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect { request, json, now } => inspect::run(request, json, now),
        Commands::StakeAmount {
            request,
            balance,
            max,
            divider,
        } => stake_amount::run(request, balance, max, divider),
        Commands::Balance { store, key, json } => balance::run(store, key, json),
        Commands::Requests { store, json } => requests::run(store, json),
        Commands::CheckConfig { config } => check_config::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
