//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::info;
use vigil_core::Secrets;

/// A repository reference, `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = Error;

    /// Parse a repository reference
    ///
    /// Supports formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    /// - git@github.com:owner/repo.git
    fn from_str(s: &str) -> Result<Self> {
        // HTTPS URL: https://github.com/owner/repo
        if s.starts_with("https://") || s.starts_with("http://") {
            let parsed = url::Url::parse(s).map_err(|e| Error::Parse(e.to_string()))?;
            let path = parsed.path().trim_start_matches('/').trim_end_matches(".git");
            return Self::from_path(path, s);
        }

        // SSH URL: git@github.com:owner/repo.git
        if s.starts_with("git@") {
            let path = s
                .split(':')
                .nth(1)
                .ok_or_else(|| Error::Parse(format!("Invalid SSH URL: {}", s)))?
                .trim_end_matches(".git");
            return Self::from_path(path, s);
        }

        // Shorthand: owner/repo
        Self::from_path(s.trim_end_matches(".git"), s)
    }
}

impl RepoRef {
    fn from_path(path: &str, original: &str) -> Result<Self> {
        let mut parts = path.split('/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(Error::Parse(format!(
                "Invalid repository reference: {}. Expected owner/repo",
                original
            ))),
        }
    }
}

/// GitHub API client for pull request operations
#[derive(Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// Token is loaded from (in priority order):
    /// 1. GITHUB_TOKEN environment variable
    /// 2. ~/.config/vigil/secrets.toml
    pub fn new() -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/vigil/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::with_token(token)
    }

    /// Create a GitHub client from an explicit token
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!("Created GitHub client");

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let repo: RepoRef = "acme/widgets".parse().unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.repo, "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_https_url() {
        let repo: RepoRef = "https://github.com/acme/widgets".parse().unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.repo, "widgets");
    }

    #[test]
    fn test_parse_https_url_with_git_suffix() {
        let repo: RepoRef = "https://github.com/acme/widgets.git".parse().unwrap();
        assert_eq!(repo.repo, "widgets");
    }

    #[test]
    fn test_parse_ssh_url() {
        let repo: RepoRef = "git@github.com:acme/widgets.git".parse().unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.repo, "widgets");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("widgets".parse::<RepoRef>().is_err());
        assert!("/widgets".parse::<RepoRef>().is_err());
        assert!("acme/".parse::<RepoRef>().is_err());
        assert!("git@github.com".parse::<RepoRef>().is_err());
    }
}
