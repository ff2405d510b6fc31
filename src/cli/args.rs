//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Armada - batch operations over an SSH host inventory
///
/// Resolves a label-filtered host inventory through an on-disk parse
/// cache and runs batch operations against the matched hosts.
#[derive(Parser, Debug)]
#[command(name = "armada")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ARMADA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show inventory instances matching a label filter
    List(ListArgs),

    /// Probe TCP reachability of matched instances
    Check(CheckArgs),

    /// Inspect or clear the inventory parse cache
    Cache(CacheArgs),

    /// Show or locate the configuration file
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Inventory file to resolve
    pub inventory: PathBuf,

    /// Label filter, e.g. "mysql=slave,zone=us"
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Render decoded passwords instead of the stored form
    #[arg(long)]
    pub decode_password: bool,

    /// Bypass the parse cache
    #[arg(long)]
    pub no_cache: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Inventory file to resolve
    pub inventory: PathBuf,

    /// Label filter, e.g. "mysql=slave,zone=us"
    #[arg(short, long)]
    pub labels: Option<String>,

    /// TCP connect timeout in seconds (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Bypass the parse cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cache entries and their freshness
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove the cache directory contents
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
