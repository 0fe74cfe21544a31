use super::Command;
use crate::config::BracketSyncConfig;
use anyhow::Result;

pub struct ShowConfigCommand {
    config: BracketSyncConfig,
}

impl ShowConfigCommand {
    pub fn new(config: BracketSyncConfig) -> Self {
        Self { config }
    }
}

impl Command for ShowConfigCommand {
    async fn execute(&self) -> Result<()> {
        print!("{}", self.config.to_toml_string()?);
        Ok(())
    }
}
