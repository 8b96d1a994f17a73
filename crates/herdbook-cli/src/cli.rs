use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "herdbook",
    about = "Herdbook: livestock supply-chain traceability ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger snapshot file
    #[arg(long, global = true, default_value = "herdbook.db")]
    pub store: PathBuf,

    /// TOML ledger configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one ledger transaction
    Invoke(InvokeArgs),
    /// Seed the ledger with sample owners and cows
    Init,
    /// List the accepted transactions and their argument counts
    Transactions,
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Transaction name, e.g. registerCow
    pub function: String,
    /// Positional transaction arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to this file
    #[arg(long)]
    pub write: Option<PathBuf>,
}
