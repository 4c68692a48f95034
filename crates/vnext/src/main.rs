//! CLI entry points for the vnext tracking-issue automation.
//!
//! CI invokes `vnext create` when a library fails a vnext check and
//! `vnext close` when it passes. Any error aborts the run with a non-zero
//! exit, which the pipeline surfaces as a failed automation step.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vnext::checks::CheckType;
use vnext::config::{Config, DEFAULT_BOT_LOGIN, DEFAULT_REPOSITORY};
use vnext::sync::{IssueSynchronizer, PackageIdentity, RunInfo};
use vnext::tracker::GitHubTracker;
use vnext::{owners, version};

/// Files and closes tracking issues for libraries failing vnext checks
#[derive(Parser)]
#[command(name = "vnext")]
#[command(about = "Files and closes tracking issues for libraries failing vnext checks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Issue tracker token
    #[arg(long, env = "GH_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Repository whose issues are managed (owner/repo)
    #[arg(long, default_value = DEFAULT_REPOSITORY, global = true)]
    repo: String,

    /// Login of the automation identity that creates tracking issues
    #[arg(long, default_value = DEFAULT_BOT_LOGIN, global = true)]
    bot: String,

    /// Ownership manifest path (discovered from the repo root if omitted)
    #[arg(long, global = true)]
    codeowners: Option<PathBuf>,

    /// CI build id used in the build-results link
    #[arg(long, env = "BUILD_BUILDID", global = true)]
    build_id: Option<String>,

    /// CI job id used in the build-results link
    #[arg(long, env = "SYSTEM_JOBID", global = true)]
    job_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a failing vnext run: file or refresh the tracking issue
    Create {
        /// Path to the failing package directory
        #[arg(long)]
        package_dir: PathBuf,

        /// Check that failed
        #[arg(long, value_enum)]
        check: CheckType,
    },
    /// Record a passing vnext run: close the tracking issue if one is open
    Close {
        /// Name of the passing package
        #[arg(long)]
        package_name: String,

        /// Check that passed
        #[arg(long, value_enum)]
        check: CheckType,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let token = cli
        .token
        .context("GH_TOKEN is not set and --token was not given")?;
    let codeowners_path = match cli.codeowners {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            owners::default_codeowners(&cwd)
                .context("No CODEOWNERS manifest found; pass --codeowners explicitly")?
        }
    };

    let config = Config {
        repository: cli.repo.clone(),
        bot_login: cli.bot,
        codeowners_path,
        build_id: cli.build_id,
        job_id: cli.job_id,
    };
    let tracker = GitHubTracker::new(token, cli.repo)?;

    match cli.command {
        Commands::Create { package_dir, check } => {
            let package = PackageIdentity::from_path(&package_dir)?;
            let run = RunInfo {
                tool_version: version::detect(check)?,
                build_url: config.build_link(check),
                today: Utc::now().date_naive(),
            };

            let sync = IssueSynchronizer::new(tracker, config);
            sync.create_vnext_issue(&package, check, &run).await?;

            println!(
                "{}",
                format!("Tracking issue is up to date for {} ({check})", package.name).green()
            );
        }
        Commands::Close {
            package_name,
            check,
        } => {
            let sync = IssueSynchronizer::new(tracker, config);
            sync.close_vnext_issue(&package_name, check).await?;

            println!(
                "{}",
                format!("No open tracking issue remains for {package_name} ({check})").green()
            );
        }
    }

    Ok(())
}
