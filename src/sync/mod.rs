//! The sync run: fetch, write, detect changes, publish

pub mod detector;
pub mod lifecycle;
pub mod publisher;
pub mod runner;

pub use detector::{porcelain_has_changes, ChangeDetector};
pub use lifecycle::{RunPhase, RunTracker, SyncEvent};
pub use publisher::{PublishReceipt, Publisher};
pub use runner::{RunMode, SyncError, SyncOptions, SyncOutcome, SyncReport, SyncRunner};
