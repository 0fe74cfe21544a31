use crate::bracket::NhlApiFetcher;
use crate::config::BracketSyncConfig;
use crate::external::{GitClient, GitRepository, ProcessCommandExecutor};
use crate::fs::StandardFileSystem;
use crate::sync::{RunMode, SyncOptions, SyncRunner};
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::Datelike;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod fetch;
pub mod show_config;
pub mod status;
pub mod sync;

pub use fetch::FetchCommand;
pub use show_config::ShowConfigCommand;
pub use status::StatusCommand;
pub use sync::SyncCommand;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Calendar year on the local clock
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Resolved inputs shared by the commands that touch the working tree
pub struct RunContext {
    pub config: BracketSyncConfig,
    pub year: i32,
    pub workspace: Workspace,
}

impl RunContext {
    pub fn prepare(config: BracketSyncConfig, year: Option<i32>) -> Result<Self> {
        let start = match config.repository.path.as_deref() {
            Some(path) => PathBuf::from(path),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let workspace = Workspace::discover(&start)?;

        Ok(Self {
            config,
            year: year.unwrap_or_else(current_year),
            workspace,
        })
    }

    pub fn git(&self) -> Arc<dyn GitRepository> {
        let executor = ProcessCommandExecutor::new()
            .with_working_dir(self.workspace.root())
            .with_timeout(Duration::from_secs(
                self.config.repository.command_timeout_seconds,
            ));
        Arc::new(GitClient::new(Arc::new(executor)))
    }

    pub fn runner(&self, mode: RunMode) -> Result<SyncRunner> {
        let fetcher = NhlApiFetcher::new(&self.config.api)?;
        let options = SyncOptions::from_config(self.workspace.root(), &self.config, mode);

        Ok(SyncRunner::new(
            Arc::new(fetcher),
            Arc::new(StandardFileSystem),
            self.git(),
            options,
        ))
    }
}
