use super::{Command, RunContext};
use anyhow::Result;

pub struct StatusCommand {
    context: RunContext,
}

impl StatusCommand {
    pub fn new(context: RunContext) -> Self {
        Self { context }
    }
}

impl Command for StatusCommand {
    async fn execute(&self) -> Result<()> {
        let status = self.context.git().status().await?;

        println!("📂 {}", self.context.workspace.root().display());
        if status.is_clean {
            println!("✅ Working tree clean");
            return Ok(());
        }

        for (label, files) in [
            ("Staged", &status.staged_files),
            ("Modified", &status.unstaged_files),
            ("Untracked", &status.untracked_files),
            ("Other", &status.other_files),
        ] {
            if files.is_empty() {
                continue;
            }
            println!("{} ({}):", label, files.len());
            for file in files {
                println!("   {}", file);
            }
        }
        Ok(())
    }
}
