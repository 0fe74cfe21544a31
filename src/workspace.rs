//! Working tree discovery and the per-repository run lock

use fd_lock::{RwLock, RwLockWriteGuard};
use git2::Repository;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const LOCK_FILE_NAME: &str = "bracket-sync.lock";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("{} is not inside a git working tree: {source}", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
    #[error("Repository at {} is bare and has no working tree", path.display())]
    BareRepository { path: PathBuf },
    #[error("Another sync is already running ({} is locked)", path.display())]
    Locked { path: PathBuf },
    #[error("Failed to open lock file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A git working tree the sync writes into
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    git_dir: PathBuf,
}

impl Workspace {
    /// Find the working tree containing `start`, walking up parent directories.
    pub fn discover(start: &Path) -> Result<Self, WorkspaceError> {
        let repo = Repository::discover(start).map_err(|source| WorkspaceError::NotARepository {
            path: start.to_path_buf(),
            source,
        })?;

        let root = repo
            .workdir()
            .ok_or_else(|| WorkspaceError::BareRepository {
                path: repo.path().to_path_buf(),
            })?
            .to_path_buf();

        debug!(root = %root.display(), "Discovered working tree");
        Ok(Self {
            root,
            git_dir: repo.path().to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lock_path(&self) -> PathBuf {
        self.git_dir.join(LOCK_FILE_NAME)
    }

    pub fn run_lock(&self) -> Result<RunLock, WorkspaceError> {
        RunLock::open(self.lock_path())
    }
}

/// Advisory lock serializing sync runs against one repository
pub struct RunLock {
    path: PathBuf,
    lock: RwLock<File>,
}

impl RunLock {
    pub fn open(path: PathBuf) -> Result<Self, WorkspaceError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| WorkspaceError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            lock: RwLock::new(file),
        })
    }

    /// Take the lock without blocking; held until the guard is dropped.
    pub fn try_acquire(&mut self) -> Result<RwLockWriteGuard<'_, File>, WorkspaceError> {
        let path = self.path.clone();
        self.lock.try_write().map_err(|_| WorkspaceError::Locked { path })
    }
}
