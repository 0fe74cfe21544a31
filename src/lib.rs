// bracket-sync library - NHL playoff bracket mirroring
// This exposes the core components for testing and integration

pub mod bracket;
pub mod cli;
pub mod config;
pub mod external;
pub mod fs;
pub mod sync;
pub mod telemetry;
pub mod workspace;

// Re-export key types for easy access
pub use bracket::{ArtifactWriter, BracketFetcher, FetchError, NhlApiFetcher, WriteError};
pub use config::BracketSyncConfig;
pub use external::{CommandExecutor, GitClient, GitError, GitRepository, ProcessCommandExecutor};
pub use sync::{RunMode, RunPhase, SyncError, SyncOptions, SyncOutcome, SyncReport, SyncRunner};
pub use telemetry::{generate_correlation_id, init_telemetry};
pub use workspace::{RunLock, Workspace, WorkspaceError};
