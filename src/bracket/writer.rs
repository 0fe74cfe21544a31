use crate::fs::FileSystemOperations;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Location of the artifact for `year`: `{repo_root}/{data_dir}/{year}.json`
pub fn artifact_path(repo_root: &Path, data_dir: &Path, year: i32) -> PathBuf {
    repo_root.join(data_dir).join(format!("{year}.json"))
}

/// Serialize with four-space indentation and no trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes payloads to disk, replacing whatever was there
pub struct ArtifactWriter {
    fs: Arc<dyn FileSystemOperations>,
}

impl ArtifactWriter {
    pub fn new(fs: Arc<dyn FileSystemOperations>) -> Self {
        Self { fs }
    }

    pub async fn write<T: Serialize + ?Sized + Sync>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), WriteError> {
        let contents = to_pretty_json(value)?;
        let replacing = self.fs.exists(path);

        self.fs
            .write(path, &contents)
            .await
            .map_err(|source| WriteError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            bytes = contents.len(),
            replaced = replacing,
            "Wrote bracket artifact"
        );
        Ok(())
    }
}
