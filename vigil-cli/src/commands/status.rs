//! Show and list commands - Inspect persisted runs

use clap::Args;
use vigil_core::{CheckpointStore, Config, Error, RunPhase};
use vigil_db::Database;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Identifier of the run to show
    #[arg(required = true)]
    pub run_id: String,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = super::open_store(config).await?;
        let snapshot = store
            .load(&self.run_id)
            .await?
            .ok_or_else(|| Error::RunNotFound(self.run_id.clone()))?;

        println!("Run {}", snapshot.run_id);
        println!("  repository: {}", snapshot.state.repo_name);
        println!("  pull request: #{}", snapshot.state.pr_number);
        println!("  phase: {}", snapshot.phase);
        println!("  approved: {}", snapshot.state.review_approved);
        match &snapshot.state.pr_diff {
            Some(diff) => println!("  diff: {} bytes", diff.len()),
            None => println!("  diff: (not fetched)"),
        }

        if snapshot.state.proposed_comments.is_empty() {
            println!("  comments: none");
        } else {
            println!("  comments:");
            for comment in &snapshot.state.proposed_comments {
                println!("    {}", comment);
            }
        }

        if !snapshot.state.messages.is_empty() {
            println!("  log:");
            for message in &snapshot.state.messages {
                println!("    [{:?}] {}", message.role, message.text);
            }
        }

        Ok(())
    }
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show runs awaiting approval
    #[arg(long)]
    pub pending: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = match &config.database.path {
            Some(path) => Database::new(path).await?,
            None => Database::default().await?,
        };

        let mut checkpoints = db.checkpoints().list_all().await?;
        if self.pending {
            checkpoints.retain(|c| c.phase == RunPhase::AwaitingApproval.as_str());
        }

        if checkpoints.is_empty() {
            println!("No runs found.");
            return Ok(());
        }

        println!(
            "{:<38} {:<28} {:>6}  {:<18} {}",
            "RUN", "REPOSITORY", "PR", "PHASE", "UPDATED"
        );
        for checkpoint in &checkpoints {
            println!(
                "{:<38} {:<28} {:>6}  {:<18} {}",
                checkpoint.run_id,
                checkpoint.repo_name,
                checkpoint.pr_number,
                checkpoint.phase,
                checkpoint.updated_at.format("%Y-%m-%d %H:%M:%S"),
            );
        }

        Ok(())
    }
}
