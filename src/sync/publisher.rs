use crate::external::{GitError, GitRepository};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub commit_message: String,
    pub pushed: bool,
}

/// Stages, commits and pushes the artifact
///
/// Steps run in order and stop at the first failure, so a failed
/// `git add` never leads to a commit or a push.
pub struct Publisher {
    git: Arc<dyn GitRepository>,
    push: bool,
}

impl Publisher {
    pub fn new(git: Arc<dyn GitRepository>) -> Self {
        Self { git, push: true }
    }

    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    pub async fn publish(&self, path: &str, message: &str) -> Result<PublishReceipt, GitError> {
        self.git.add(path).await?;
        info!(%path, "Staged artifact");

        self.git.commit(message).await?;
        info!(%message, "Committed artifact");

        if self.push {
            self.git.push().await?;
            info!("Pushed to upstream");
        }

        Ok(PublishReceipt {
            commit_message: message.to_string(),
            pushed: self.push,
        })
    }
}
