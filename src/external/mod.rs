//! External tool abstractions
//!
//! Trait-based wrappers over the git CLI, so sync logic can be exercised with
//! scripted command output instead of real processes.

pub mod command;
pub mod git;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use git::{GitClient, GitError, GitRepository, GitStatus};
