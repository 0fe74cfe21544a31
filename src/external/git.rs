//! Git command abstractions
//!
//! Provides a trait over the handful of git porcelain commands a sync run
//! needs. Every call inspects the exit status of the underlying process and
//! turns failures into a [`GitError`] instead of carrying on silently.

use super::command::{CommandError, CommandExecutor};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Repository not found or not a git repository")]
    RepositoryNotFound,
    #[error("Nothing staged to commit")]
    NothingToCommit,
    #[error("Push rejected by remote: {message}")]
    PushRejected { message: String },
    #[error("Command execution error: {source}")]
    CommandError {
        #[from]
        source: CommandError,
    },
    #[error("git {step} failed: {message}")]
    GitCommandFailed { step: String, message: String },
}

/// Parsed form of `git status --porcelain`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    pub is_clean: bool,
    pub staged_files: Vec<String>,
    pub unstaged_files: Vec<String>,
    pub untracked_files: Vec<String>,
    /// Conflicts, type changes, intent-to-add and any other code
    pub other_files: Vec<String>,
}

impl GitStatus {
    /// Parse porcelain v1 output. Lines shorter than the `XY ` prefix are ignored.
    pub fn parse(output: &str) -> Self {
        let mut staged_files = Vec::new();
        let mut unstaged_files = Vec::new();
        let mut untracked_files = Vec::new();
        let mut other_files = Vec::new();

        for line in output.lines() {
            let mut chars = line.chars();
            let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
                continue;
            };
            let Some(filename) = line.get(3..).filter(|name| !name.is_empty()) else {
                continue;
            };

            match (index, worktree) {
                ('?', '?') => untracked_files.push(filename.to_string()),
                // unmerged: any U, or both sides added/deleted
                ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D') => {
                    other_files.push(filename.to_string())
                }
                (index, worktree) => {
                    let staged = matches!(index, 'A' | 'M' | 'D' | 'R' | 'C');
                    let unstaged = matches!(worktree, 'M' | 'D');
                    if staged {
                        staged_files.push(filename.to_string());
                    }
                    if unstaged {
                        unstaged_files.push(filename.to_string());
                    }
                    if !staged && !unstaged {
                        other_files.push(filename.to_string());
                    }
                }
            }
        }

        let is_clean = staged_files.is_empty()
            && unstaged_files.is_empty()
            && untracked_files.is_empty()
            && other_files.is_empty();

        GitStatus {
            is_clean,
            staged_files,
            unstaged_files,
            untracked_files,
            other_files,
        }
    }
}

/// Trait for git working tree operations
#[async_trait]
pub trait GitRepository: Send + Sync {
    /// Raw `git status --porcelain` output, untrimmed
    async fn status_porcelain(&self) -> Result<String, GitError>;

    /// Parsed repository status
    async fn status(&self) -> Result<GitStatus, GitError> {
        let output = self.status_porcelain().await?;
        Ok(GitStatus::parse(&output))
    }

    /// Stage a single path (`git add <path>`)
    async fn add(&self, path: &str) -> Result<(), GitError>;

    /// Record staged changes (`git commit -m <message>`)
    async fn commit(&self, message: &str) -> Result<(), GitError>;

    /// Push the current branch to its configured upstream (`git push`)
    async fn push(&self) -> Result<(), GitError>;
}

/// Real git implementation driven through a [`CommandExecutor`]
pub struct GitClient {
    executor: Arc<dyn CommandExecutor>,
}

impl GitClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    async fn execute_git_command(&self, args: &[&str]) -> Result<String, GitError> {
        debug!(args = ?args, "Running git command");
        let output = self.executor.execute("git", args).await?;

        if !output.success() {
            return Err(classify_git_error(&output.stdout, &output.stderr, args));
        }

        Ok(output.stdout)
    }
}

fn classify_git_error(stdout: &str, stderr: &str, args: &[&str]) -> GitError {
    let step = args.first().copied().unwrap_or("command");

    if stderr.contains("not a git repository") {
        GitError::RepositoryNotFound
    } else if step == "commit"
        && [stdout, stderr].iter().any(|text| {
            text.contains("nothing to commit") || text.contains("nothing added to commit")
        })
    {
        GitError::NothingToCommit
    } else if step == "push" && (stderr.contains("[rejected]") || stderr.contains("non-fast-forward")) {
        GitError::PushRejected {
            message: stderr.trim().to_string(),
        }
    } else {
        let message = if stderr.trim().is_empty() { stdout } else { stderr };
        GitError::GitCommandFailed {
            step: step.to_string(),
            message: message.trim().to_string(),
        }
    }
}

#[async_trait]
impl GitRepository for GitClient {
    async fn status_porcelain(&self) -> Result<String, GitError> {
        self.execute_git_command(&["status", "--porcelain"]).await
    }

    async fn add(&self, path: &str) -> Result<(), GitError> {
        self.execute_git_command(&["add", path]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.execute_git_command(&["commit", "-m", message]).await?;
        Ok(())
    }

    async fn push(&self) -> Result<(), GitError> {
        self.execute_git_command(&["push"]).await?;
        Ok(())
    }
}
