use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::render::Theme;

#[derive(Debug, Parser)]
#[command(name = "counter-dapp")]
#[command(bin_name = "counter-dapp")]
#[command(about = "Read and drive the on-chain Counter contract")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Configuration file (defaults to ./counter-dapp.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Devnet state file.
    #[arg(long, global = true, env = "COUNTER_DAPP_STATE")]
    pub state: Option<PathBuf>,

    /// Connected account address, hex or decimal.
    #[arg(long, global = true, env = "COUNTER_DAPP_ACCOUNT")]
    pub account: Option<String>,

    /// Colour theme for rendered output.
    #[arg(long, global = true, value_enum)]
    pub theme: Option<Theme>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Counter(CounterCommand),
    /// Manage the local devnet state file.
    #[command(subcommand)]
    Devnet(DevnetCommand),
    /// Print the Counter contract schema as JSON.
    Schema(SchemaArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Subcommand)]
pub enum CounterCommand {
    /// Show the counter page.
    Show,
    /// List CounterChanged events.
    Events,
    /// Increase the counter by one.
    Increment,
    /// Decrease the counter by one.
    Decrement,
    /// Set the counter to a value (owner only).
    Set(SetArgs),
    /// Reset the counter to zero (costs 1 STRK).
    Reset,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// New counter value, decimal or 0x-prefixed hex.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Subcommand)]
pub enum DevnetCommand {
    /// Deploy a fresh Counter contract into the state file.
    Init(InitArgs),
    /// Credit STRK to an account.
    Fund(TokenArgs),
    /// Set the STRK amount an account lets the contract spend.
    Approve(TokenArgs),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Contract owner address.
    #[arg(long)]
    pub owner: String,

    /// Network display name.
    #[arg(long)]
    pub network: Option<String>,

    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Account address.
    pub account: String,

    /// Amount in whole STRK.
    pub amount: u64,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
