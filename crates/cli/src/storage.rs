use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use star_tracker_core::{
    errors::StarTrackerError,
    models::History,
    stargazers::StargazerMap,
    storage::{HISTORY_FILE, STARGAZERS_FILE},
    SnapshotStore,
};

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;

/// Stores the history, the stargazers and the reports as files in a directory.
///
/// The directory may be a working copy of a data branch; committing it is
/// left to whoever schedules the runs.
#[derive(Debug, Clone)]
pub struct DataDirectoryStore {
    root: PathBuf,
}

impl DataDirectoryStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative_path: &str) -> PathBuf {
        relative_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    async fn read_json<T: DeserializeOwned + Default>(
        &self,
        file_name: &str,
    ) -> Result<T, StarTrackerError> {
        let path = self.resolve(file_name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "No stored data found, starting empty");
                return Ok(T::default());
            }
            Err(e) => {
                return Err(StarTrackerError::StorageError(format!(
                    "Failed to read {:?}: {}",
                    path, e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StarTrackerError::StorageError(format!("Failed to parse {:?}: {}", path, e))
        })
    }

    async fn write_json<T: Serialize + Sync>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<(), StarTrackerError> {
        let content = serde_json::to_string_pretty(value).map_err(|e| {
            StarTrackerError::StorageError(format!("Failed to serialize {}: {}", file_name, e))
        })?;

        self.write_file(file_name, &content).await
    }

    async fn write_file(
        &self,
        relative_path: &str,
        contents: &str,
    ) -> Result<(), StarTrackerError> {
        let path = self.resolve(relative_path);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StarTrackerError::StorageError(format!(
                    "Failed to create directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        tokio::fs::write(&path, contents).await.map_err(|e| {
            StarTrackerError::StorageError(format!("Failed to write {:?}: {}", path, e))
        })?;

        debug!(path = ?path, bytes = contents.len(), "Wrote file");
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for DataDirectoryStore {
    #[instrument(skip(self), fields(root = ?self.root))]
    async fn read_history(&self) -> Result<History, StarTrackerError> {
        self.read_json(HISTORY_FILE).await
    }

    #[instrument(skip(self, history), fields(snapshots = history.len()))]
    async fn write_history(&self, history: &History) -> Result<(), StarTrackerError> {
        self.write_json(HISTORY_FILE, history).await
    }

    async fn read_stargazers(&self) -> Result<StargazerMap, StarTrackerError> {
        self.read_json(STARGAZERS_FILE).await
    }

    async fn write_stargazers(&self, stargazers: &StargazerMap) -> Result<(), StarTrackerError> {
        self.write_json(STARGAZERS_FILE, stargazers).await
    }

    async fn write_artifact(
        &self,
        relative_path: &str,
        contents: &str,
    ) -> Result<(), StarTrackerError> {
        self.write_file(relative_path, contents).await
    }
}
