/// File system operations abstraction for testing
///
/// This module provides a trait-based abstraction over the file system calls
/// the artifact writer makes, so they can be mocked with the `mockall` crate.
///
/// # Examples
///
/// ```rust,no_run
/// use bracket_sync::fs::{FileSystemOperations, StandardFileSystem};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> std::io::Result<()> {
///     let fs_ops: Arc<dyn FileSystemOperations> = Arc::new(StandardFileSystem);
///
///     fs_ops.write(Path::new("playoffs/data/2025.json"), b"{}").await?;
///
///     if fs_ops.exists(Path::new("playoffs/data/2025.json")) {
///         println!("Artifact written");
///     }
///
///     Ok(())
/// }
/// ```
use std::io;
use std::path::Path;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// Trait for file system operations that can be mocked in tests
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait::async_trait]
pub trait FileSystemOperations: Send + Sync {
    /// Write data to a file, replacing any existing content
    ///
    /// The parent directory must already exist; a missing directory is
    /// reported as an error rather than created.
    ///
    /// # Arguments
    /// * `path` - The file path to write to
    /// * `contents` - The bytes to write
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Standard implementation that uses actual file system operations
///
/// This is the production implementation of `FileSystemOperations`. Use this
/// in production code and switch to `MockFileSystemOperations` in tests.
pub struct StandardFileSystem;

#[async_trait::async_trait]
impl FileSystemOperations for StandardFileSystem {
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
