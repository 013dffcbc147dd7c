use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{ForgeRepository, RepositoryVisibility, Stargazer};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for reading repository data from developer platforms (e.g., GitHub, GitLab).
///
/// Implementations list the repositories of the authenticated account and the
/// accounts that starred each of them. Implementations are expected to follow
/// the platform's pagination until every item has been returned.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use star_tracker_developer_platforms::{
///     errors::Error,
///     models::{ForgeRepository, RepositoryVisibility, Stargazer},
///     RepositoryProvider,
/// };
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct FixedProvider {
///     repos: Vec<ForgeRepository>,
/// }
///
/// #[async_trait]
/// impl RepositoryProvider for FixedProvider {
///     async fn list_repositories(
///         &self,
///         _visibility: RepositoryVisibility,
///     ) -> Result<Vec<ForgeRepository>, Error> {
///         Ok(self.repos.clone())
///     }
///
///     async fn list_stargazers(
///         &self,
///         _repo_owner: &str,
///         _repo_name: &str,
///     ) -> Result<Vec<Stargazer>, Error> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Sync + Send {
    /// Lists every repository of the authenticated account.
    ///
    /// # Arguments
    ///
    /// * `visibility` - Which repositories to include
    ///
    /// # Returns
    ///
    /// A `Result` containing all repositories, unfiltered, in the order the
    /// platform returned them
    async fn list_repositories(
        &self,
        visibility: RepositoryVisibility,
    ) -> Result<Vec<ForgeRepository>, Error>;

    /// Lists the accounts that starred a repository.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    ///
    /// # Returns
    ///
    /// A `Result` containing every stargazer together with the time the star was given
    async fn list_stargazers(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Stargazer>, Error>;
}
