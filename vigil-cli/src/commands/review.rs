//! Review command - Start a review run

use clap::Args;
use uuid::Uuid;
use vigil_core::Config;

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Target repository (owner/repo, or a GitHub URL)
    #[arg(short, long)]
    pub repo: String,

    /// Pull request number
    #[arg(short, long)]
    pub pr: u64,

    /// Run identifier (defaults to a generated UUID)
    #[arg(long)]
    pub run_id: Option<String>,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if verbose {
            tracing::info!(
                repo = %self.repo,
                pr = self.pr,
                run_id = %run_id,
                "Starting review run"
            );
        }

        let runner = super::build_runner(config).await?;
        let snapshot = runner.start(&run_id, &self.repo, self.pr).await?;

        println!("Review of {}#{}", self.repo, self.pr);
        println!();

        if snapshot.state.proposed_comments.is_empty() {
            println!("No issues found.");
        } else {
            println!(
                "Proposed comments ({}):",
                snapshot.state.proposed_comments.len()
            );
            for comment in &snapshot.state.proposed_comments {
                println!("  {}", comment);
            }
        }

        println!();
        println!("Run {} suspended awaiting approval.", run_id);
        println!("  approve and post: vigil approve {}", run_id);
        println!("  reject:           vigil reject {}", run_id);

        Ok(())
    }
}
