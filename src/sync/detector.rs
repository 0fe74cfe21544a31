use crate::external::{GitError, GitRepository, GitStatus};
use std::sync::Arc;
use tracing::info;

/// True iff the porcelain listing has any content once whitespace is trimmed.
pub fn porcelain_has_changes(output: &str) -> bool {
    !output.trim().is_empty()
}

/// Reports whether the working tree has uncommitted modifications
///
/// The whole tree is considered, not only the artifact: any dirty path
/// counts as a change.
pub struct ChangeDetector {
    git: Arc<dyn GitRepository>,
}

impl ChangeDetector {
    pub fn new(git: Arc<dyn GitRepository>) -> Self {
        Self { git }
    }

    pub async fn has_changes(&self) -> Result<bool, GitError> {
        let output = self.git.status_porcelain().await?;

        if !porcelain_has_changes(&output) {
            info!("Working tree clean");
            return Ok(false);
        }

        let status = GitStatus::parse(&output);
        info!(
            staged = status.staged_files.len(),
            unstaged = status.unstaged_files.len(),
            untracked = status.untracked_files.len(),
            "Working tree has changes"
        );
        Ok(true)
    }
}
