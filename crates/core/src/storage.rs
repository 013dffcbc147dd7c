use async_trait::async_trait;

use crate::errors::StarTrackerError;
use crate::models::History;
use crate::stargazers::StargazerMap;

/// Name of the snapshot history file inside the data location.
pub const HISTORY_FILE: &str = "stars-data.json";

/// Name of the stargazer map file inside the data location.
pub const STARGAZERS_FILE: &str = "stargazers.json";

/// Persistence for the data carried between runs and the artifacts a run
/// produces.
///
/// Reads of data that was never written return the empty value rather than
/// an error, so the first run behaves like any other.
#[async_trait]
pub trait SnapshotStore: Sync + Send {
    async fn read_history(&self) -> Result<History, StarTrackerError>;

    async fn write_history(&self, history: &History) -> Result<(), StarTrackerError>;

    async fn read_stargazers(&self) -> Result<StargazerMap, StarTrackerError>;

    async fn write_stargazers(&self, stargazers: &StargazerMap) -> Result<(), StarTrackerError>;

    /// Writes a rendered artifact, e.g. `README.md` or `charts/star-history.svg`.
    ///
    /// # Arguments
    ///
    /// * `relative_path` - Path relative to the data location, `/` separated
    /// * `contents` - The full file contents
    async fn write_artifact(
        &self,
        relative_path: &str,
        contents: &str,
    ) -> Result<(), StarTrackerError>;
}
