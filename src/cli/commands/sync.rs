use super::{Command, RunContext};
use crate::sync::{RunMode, SyncOutcome, SyncReport};
use crate::telemetry::{create_sync_span, generate_correlation_id};
use anyhow::Result;
use tracing::Instrument;

pub struct SyncCommand {
    context: RunContext,
    dry_run: bool,
}

impl SyncCommand {
    pub fn new(context: RunContext) -> Self {
        Self {
            context,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Sync
        }
    }
}

impl Command for SyncCommand {
    async fn execute(&self) -> Result<()> {
        let year = self.context.year;
        let mut lock = self.context.workspace.run_lock()?;
        let _guard = lock.try_acquire()?;

        println!("🏒 Syncing {} playoff bracket", year);

        let correlation_id = generate_correlation_id();
        let runner = self.context.runner(self.mode())?;
        let report = runner
            .run(year)
            .instrument(create_sync_span("sync", year, &correlation_id))
            .await?;

        print_report(&report);
        Ok(())
    }
}

pub(crate) fn print_report(report: &SyncReport) {
    match &report.outcome {
        SyncOutcome::Published { commit_message, pushed } => {
            println!("📝 Changes detected. Committed {}", report.artifact.display());
            println!("   💬 {}", commit_message);
            if *pushed {
                println!("🚀 Pushed to upstream");
            } else {
                println!("⏸️  Push disabled, commit left local");
            }
        }
        SyncOutcome::Unchanged => {
            println!("✅ No changes detected. Skipping commit.");
        }
        SyncOutcome::ChangesNotPublished => {
            println!("📝 Changes detected in the working tree (not committed)");
        }
        SyncOutcome::Written => {
            println!("💾 Wrote {}", report.artifact.display());
        }
        SyncOutcome::Aborted { reason } => {
            println!("❌ Error fetching data: {}", reason);
        }
    }
}
