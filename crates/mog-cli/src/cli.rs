use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mog",
    about = "Mother Overlay Graph: editable clause hierarchies over a fixed corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON corpus export. Overrides `corpus_path` from the config file.
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the tree of a scope
    Tree(TreeArgs),
    /// Load the corpus and verify the base forest
    Check,
    /// List the effective descendants of a node
    Descendants(DescendantsArgs),
    /// Show corpus and overlay counts
    Stats,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind. Overrides `bind_addr` from the config file.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Scope descriptor, e.g. `Genesis.1` or `Gen.1.1-5`
    #[arg(short, long)]
    pub scope: Option<String>,
    /// Include ancestors and siblings outside the scope
    #[arg(long)]
    pub context: bool,
}

#[derive(Args)]
pub struct DescendantsArgs {
    pub id: u64,
}
