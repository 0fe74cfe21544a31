use super::sync::print_report;
use super::{Command, RunContext};
use crate::sync::RunMode;
use crate::telemetry::{create_sync_span, generate_correlation_id};
use anyhow::Result;
use tracing::Instrument;

/// Fetch and write the artifact without looking at git
pub struct FetchCommand {
    context: RunContext,
}

impl FetchCommand {
    pub fn new(context: RunContext) -> Self {
        Self { context }
    }
}

impl Command for FetchCommand {
    async fn execute(&self) -> Result<()> {
        let year = self.context.year;
        let mut lock = self.context.workspace.run_lock()?;
        let _guard = lock.try_acquire()?;

        println!("📥 Fetching {} playoff bracket", year);

        let correlation_id = generate_correlation_id();
        let report = self
            .context
            .runner(RunMode::FetchOnly)?
            .run(year)
            .instrument(create_sync_span("fetch", year, &correlation_id))
            .await?;

        print_report(&report);
        Ok(())
    }
}
