//! Pull request diff fetching

use crate::{Error, GitHubClient, RepoRef, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use vigil_core::DiffSource;

impl GitHubClient {
    /// Fetch the textual diff for a pull request
    pub async fn pr_diff(&self, repo: &str, pr_number: u64) -> Result<String> {
        let repo_ref: RepoRef = repo.parse()?;

        debug!(repo = %repo_ref, pr = pr_number, "Fetching pull request diff");

        let diff = self
            .client()
            .pulls(&repo_ref.owner, &repo_ref.repo)
            .get_diff(pr_number)
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::PrNotFound(pr_number)
                }
                _ => Error::Api(e),
            })?;

        info!(
            repo = %repo_ref,
            pr = pr_number,
            bytes = diff.len(),
            "Fetched pull request diff"
        );

        Ok(diff)
    }
}

#[async_trait]
impl DiffSource for GitHubClient {
    async fn fetch_diff(&self, repo: &str, pr_number: u64) -> vigil_core::Result<String> {
        self.pr_diff(repo, pr_number)
            .await
            .map_err(|e| vigil_core::Error::Diff(e.to_string()))
    }
}
