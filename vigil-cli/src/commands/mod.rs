//! CLI commands for Vigil

mod approve;
mod review;
mod status;

pub use approve::{ApproveArgs, RejectArgs};
pub use review::ReviewArgs;
pub use status::{ListArgs, ShowArgs};

use anyhow::Context;
use vigil_core::{CheckpointManager, Config, ReviewRunner, Secrets};
use vigil_github::GitHubClient;
use vigil_llm::OpenAiAnalyst;

/// The runner wired to its production collaborators
pub(crate) type CliRunner =
    ReviewRunner<GitHubClient, OpenAiAnalyst, GitHubClient, CheckpointManager>;

/// Open the checkpoint store from configuration
pub(crate) async fn open_store(config: &Config) -> anyhow::Result<CheckpointManager> {
    let store = match &config.database.path {
        Some(path) => CheckpointManager::open(path).await?,
        None => CheckpointManager::new().await?,
    };
    Ok(store)
}

/// Construct a runner from configuration and secrets
///
/// Built explicitly per invocation; nothing is held in process-wide state.
pub(crate) async fn build_runner(config: &Config) -> anyhow::Result<CliRunner> {
    let secrets = Secrets::load().context("Failed to load secrets")?;

    let token = secrets.github_token().context(
        "GitHub token not found. Set GITHUB_TOKEN environment variable \
         or add token to ~/.config/vigil/secrets.toml",
    )?;
    let github = GitHubClient::with_token(token)?;

    // The API key is only required once an analysis actually runs, so
    // approve/reject work without one.
    let analyst = OpenAiAnalyst::new(config.llm.clone(), secrets.llm_api_key())?;

    let store = open_store(config).await?;

    Ok(ReviewRunner::new(github.clone(), analyst, github, store))
}
