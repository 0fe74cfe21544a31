use anyhow::Result;
use bracket_sync::cli::commands::{
    Command, FetchCommand, RunContext, ShowConfigCommand, StatusCommand, SyncCommand,
};
use bracket_sync::cli::{Cli, Commands};
use bracket_sync::config::BracketSyncConfig;
use bracket_sync::telemetry::init_telemetry;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = BracketSyncConfig::load_env_file()?;
    let mut config = BracketSyncConfig::load(cli.config.as_deref())?;
    if let Some(repo) = &cli.repo {
        config.repository.path = Some(repo.display().to_string());
    }

    init_telemetry(&config.observability)?;
    if env_file_loaded {
        tracing::info!("Loaded environment variables from .env file");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    match cli.command.unwrap_or_default() {
        Commands::Sync { dry_run } => {
            let context = RunContext::prepare(config, cli.year)?;
            runtime.block_on(async { SyncCommand::new(context).with_dry_run(dry_run).execute().await })
        }
        Commands::Fetch => {
            let context = RunContext::prepare(config, cli.year)?;
            runtime.block_on(async { FetchCommand::new(context).execute().await })
        }
        Commands::Status => {
            let context = RunContext::prepare(config, cli.year)?;
            runtime.block_on(async { StatusCommand::new(context).execute().await })
        }
        Commands::Config => {
            runtime.block_on(async { ShowConfigCommand::new(config).execute().await })
        }
    }
}
