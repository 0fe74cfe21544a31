use super::detector::ChangeDetector;
use super::lifecycle::{RunPhase, RunTracker, SyncEvent};
use super::publisher::Publisher;
use crate::bracket::{artifact_path, ArtifactWriter, BracketFetcher, WriteError};
use crate::config::{BracketSyncConfig, PublishConfig};
use crate::external::{GitError, GitRepository};
use crate::fs::FileSystemOperations;
use crate::workspace::WorkspaceError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch, write, detect and publish
    Sync,
    /// Fetch, write and detect; never publish
    DryRun,
    /// Fetch and write only
    FetchOnly,
}

/// Everything a run needs besides its collaborators
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub repo_root: PathBuf,
    pub data_dir: PathBuf,
    pub publish: PublishConfig,
    pub mode: RunMode,
}

impl SyncOptions {
    pub fn from_config(repo_root: &Path, config: &BracketSyncConfig, mode: RunMode) -> Self {
        let mode = match mode {
            RunMode::Sync if !config.publish.enabled => RunMode::DryRun,
            mode => mode,
        };

        Self {
            repo_root: repo_root.to_path_buf(),
            data_dir: PathBuf::from(&config.repository.data_dir),
            publish: config.publish.clone(),
            mode,
        }
    }

    pub fn artifact_path(&self, year: i32) -> PathBuf {
        artifact_path(&self.repo_root, &self.data_dir, year)
    }

    pub fn commit_message(&self, year: i32) -> String {
        self.publish.render_commit_message(year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Changes were committed (and pushed unless push is disabled)
    Published { commit_message: String, pushed: bool },
    /// The write left the working tree clean
    Unchanged,
    /// The working tree changed but publishing was not requested
    ChangesNotPublished,
    /// Fetch-only run; change detection was not performed
    Written,
    /// The fetch failed; nothing was written
    Aborted { reason: String },
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub year: i32,
    pub artifact: PathBuf,
    pub outcome: SyncOutcome,
    pub phase: RunPhase,
}

/// Runs fetch, write, change detection and publish in strict sequence
pub struct SyncRunner {
    fetcher: Arc<dyn BracketFetcher>,
    writer: ArtifactWriter,
    detector: ChangeDetector,
    publisher: Publisher,
    options: SyncOptions,
}

impl SyncRunner {
    pub fn new(
        fetcher: Arc<dyn BracketFetcher>,
        fs: Arc<dyn FileSystemOperations>,
        git: Arc<dyn GitRepository>,
        options: SyncOptions,
    ) -> Self {
        Self {
            fetcher,
            writer: ArtifactWriter::new(fs),
            detector: ChangeDetector::new(git.clone()),
            publisher: Publisher::new(git).with_push(options.publish.push),
            options,
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub async fn run(&self, year: i32) -> Result<SyncReport, SyncError> {
        let mut tracker = RunTracker::new();
        let artifact = self.options.artifact_path(year);
        let report = |outcome: SyncOutcome, tracker: &RunTracker| SyncReport {
            year,
            artifact: artifact.clone(),
            outcome,
            phase: tracker.phase(),
        };

        let payload = match self.fetcher.fetch(year).await {
            Ok(payload) => {
                tracker.handle(SyncEvent::FetchSucceeded);
                payload
            }
            Err(e) => {
                error!(error = %e, "Error fetching bracket data");
                tracker.handle(SyncEvent::FetchFailed);
                return Ok(report(SyncOutcome::Aborted { reason: e.to_string() }, &tracker));
            }
        };

        self.writer.write(&artifact, &payload).await?;
        tracker.handle(SyncEvent::Written);

        if self.options.mode == RunMode::FetchOnly {
            tracker.handle(SyncEvent::Skipped);
            return Ok(report(SyncOutcome::Written, &tracker));
        }

        if !self.detector.has_changes().await? {
            info!("No changes detected, skipping commit");
            tracker.handle(SyncEvent::Skipped);
            return Ok(report(SyncOutcome::Unchanged, &tracker));
        }

        if self.options.mode == RunMode::DryRun {
            info!("Changes detected, publishing disabled for this run");
            tracker.handle(SyncEvent::Skipped);
            return Ok(report(SyncOutcome::ChangesNotPublished, &tracker));
        }

        let relative = self.relative_artifact(&artifact);
        let message = self.options.commit_message(year);
        if !mentions_artifact(&message, &artifact) {
            warn!(
                %message,
                artifact = %relative,
                "Commit message does not name the artifact being committed"
            );
        }

        info!("Changes detected, committing and pushing");
        let receipt = self.publisher.publish(&relative, &message).await?;
        tracker.handle(SyncEvent::Published);

        Ok(report(
            SyncOutcome::Published {
                commit_message: receipt.commit_message,
                pushed: receipt.pushed,
            },
            &tracker,
        ))
    }

    fn relative_artifact(&self, artifact: &Path) -> String {
        artifact
            .strip_prefix(&self.options.repo_root)
            .unwrap_or(artifact)
            .to_string_lossy()
            .into_owned()
    }
}

fn mentions_artifact(message: &str, artifact: &Path) -> bool {
    artifact
        .file_name()
        .map(|name| message.contains(name.to_string_lossy().as_ref()))
        .unwrap_or(true)
}
