//! Vigil CLI - Command line interface for Vigil
//!
//! Human-gated automated pull-request review: generate comments with an
//! LLM, suspend for approval, then post or skip.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vigil_core::{Config, Secrets};

use commands::{ApproveArgs, ListArgs, RejectArgs, ReviewArgs, ShowArgs};

/// Vigil: automated PR review with a human approval gate
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Checkpoint database path (overrides config and env)
    #[arg(long, global = true, env = "VIGIL_DB")]
    db: Option<PathBuf>,

    /// Analysis model (overrides config and env)
    #[arg(long, global = true, env = "VIGIL_MODEL")]
    model: Option<String>,

    /// OpenAI-compatible endpoint base URL (overrides config and env)
    #[arg(long, global = true, env = "VIGIL_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a pull request; suspends for approval after generating comments
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Approve a suspended run and post its comments
    Approve(ApproveArgs),

    /// Reject a suspended run; nothing is posted
    Reject(RejectArgs),

    /// Show a persisted run
    Show(ShowArgs),

    /// List persisted runs
    List(ListArgs),

    /// Show current configuration
    Config,

    /// Create a secrets file template
    InitSecrets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config =
        Config::load_with_overrides(cli.base_url.clone(), cli.model.clone(), cli.db.clone())?;

    if cli.verbose {
        tracing::info!(
            base_url = %config.llm.base_url,
            model = %config.llm.model,
            db = ?config.database.path,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("vigil {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Approve(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Reject(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Show(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::List(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Vigil Configuration");
            println!("===================");
            println!();
            println!("LLM Settings:");
            println!("  base_url: {}", config.llm.base_url);
            println!("  model: {}", config.llm.model);
            println!("  temperature: {}", config.llm.temperature);
            println!("Database:");
            match &config.database.path {
                Some(path) => println!("  path: {}", path.display()),
                None => println!("  path: (default cache location)"),
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::InitSecrets) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
        }
        None => {
            println!("Vigil - automated PR review with a human approval gate");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
