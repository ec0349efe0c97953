//! Approve and reject commands - Resume a suspended run

use clap::Args;
use vigil_core::Config;

/// Arguments for the approve command
#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Identifier of the suspended run
    #[arg(required = true)]
    pub run_id: String,
}

impl ApproveArgs {
    /// Execute the approve command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        if verbose {
            tracing::info!(run_id = %self.run_id, "Approving run");
        }

        let runner = super::build_runner(config).await?;
        runner.set_approved(&self.run_id, true).await?;
        let (snapshot, message) = runner.resume(&self.run_id).await?;

        println!("{}", message);
        println!(
            "Run {} finished ({}#{}).",
            snapshot.run_id, snapshot.state.repo_name, snapshot.state.pr_number
        );

        Ok(())
    }
}

/// Arguments for the reject command
#[derive(Args, Debug)]
pub struct RejectArgs {
    /// Identifier of the suspended run
    #[arg(required = true)]
    pub run_id: String,
}

impl RejectArgs {
    /// Execute the reject command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        if verbose {
            tracing::info!(run_id = %self.run_id, "Rejecting run");
        }

        let runner = super::build_runner(config).await?;
        runner.set_approved(&self.run_id, false).await?;
        let (snapshot, message) = runner.resume(&self.run_id).await?;

        println!("{}", message);
        println!("Run {} finished without posting.", snapshot.run_id);

        Ok(())
    }
}
