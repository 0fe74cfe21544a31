use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "bracket-sync")]
#[command(about = "Mirror the NHL playoff bracket into a git repository")]
#[command(long_about = "bracket-sync fetches the current playoff bracket from the NHL web API, \
                       writes it to playoffs/data/<year>.json and commits and pushes the file \
                       when the working tree changed. Running without a subcommand performs a sync.")]
pub struct Cli {
    /// Season year to process (defaults to the current calendar year)
    #[arg(long, global = true, help = "Season year to fetch and write")]
    pub year: Option<i32>,
    /// Path inside the target working tree
    #[arg(long, global = true, help = "Repository to write into (defaults to the current directory)")]
    pub repo: Option<PathBuf>,
    /// Configuration file
    #[arg(long, global = true, help = "Configuration file (defaults to ./bracket-sync.toml when present)")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch the bracket, write it, and commit and push when the tree changed
    Sync {
        /// Detect changes but never commit or push
        #[arg(long, help = "Fetch, write and report changes without committing")]
        dry_run: bool,
    },
    /// Fetch the bracket and write it without touching git
    Fetch,
    /// Show uncommitted changes in the working tree
    Status,
    /// Print the effective configuration as TOML
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Sync { dry_run: false }
    }
}
