//! git-sync: stage, commit and push local changes in one step

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use git_sync::commands::{handle_install_command, handle_sync_command};
use git_sync::sync::SyncOptions;
use git_sync::utils::Output;

#[derive(Parser)]
#[command(
    name = "git-sync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stage, commit and push local changes with safety checks and hooks"
)]
struct Cli {
    /// Commit message
    #[arg(short, long)]
    message: Option<String>,

    /// Conventional commit type (feat, fix, docs, ...)
    #[arg(long = "type", value_name = "TYPE")]
    commit_type: Option<String>,

    /// Branch to push instead of the current one
    #[arg(long)]
    branch: Option<String>,

    /// Remote to use instead of the configured default
    #[arg(long)]
    remote: Option<String>,

    /// Only stage and commit
    #[arg(long)]
    commit_only: bool,

    /// Only push existing commits
    #[arg(long)]
    push_only: bool,

    /// Pull from the remote before pushing
    #[arg(long)]
    pull: bool,

    /// Show what would run without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Review staged changes before committing
    #[arg(short, long)]
    interactive: bool,

    /// Show the working tree status first
    #[arg(long)]
    status: bool,

    /// Print statistics when done
    #[arg(long)]
    stats: bool,

    /// Show git output and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Use this configuration file instead of the user and repository files
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a `sync` script in the project manifest
    Install {
        /// Manifest to edit (default: composer.json)
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Overwrite an existing `sync` script without asking
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            message: self.message.clone(),
            commit_type: self.commit_type.clone(),
            branch: self.branch.clone(),
            remote: self.remote.clone(),
            dry_run: self.dry_run,
            pull: self.pull,
            interactive: self.interactive,
            commit_only: self.commit_only,
            push_only: self.push_only,
            show_status: self.status,
            show_stats: self.stats,
            verbose: self.verbose,
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let output = Output::new(cli.verbose, cli.quiet);
    let options = cli.sync_options();

    match cli.command {
        Some(Commands::Install { manifest, force }) => handle_install_command(manifest, force, output),
        None => {
            let code = handle_sync_command(options, cli.config, output).await?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
    }
}
