//! Sync command implementation
//!
//! Loads configuration for the current directory, runs the pipeline against
//! the real git binary and prints the outcome.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::core::{load_config, set_terminal_title, ConfigError, LoadOptions};
use crate::git::ProcessExecutor;
use crate::sync::{FailureKind, PipelineOutcome, SyncOptions, SyncPipeline, SyncReport};
use crate::utils::{terminal_confirm, Output};

/// Runs one sync in the current directory and returns the process exit code
pub async fn handle_sync_command(
    options: SyncOptions,
    config_path: Option<PathBuf>,
    output: Output,
) -> Result<i32> {
    let workdir = std::env::current_dir().context("failed to determine current directory")?;

    let mut load_options = LoadOptions::for_workdir(&workdir);
    load_options.explicit = config_path;
    let config = match load_config(&load_options) {
        Ok(config) => config,
        Err(ConfigError::Invalid(problems)) => {
            // Same reporting as semantic problems found by the pipeline
            report_failure(&FailureKind::ConfigInvalid(problems), output);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    set_terminal_title("🔄 git-sync");

    let executor = ProcessExecutor::new(&workdir);
    let pipeline = SyncPipeline::new(&executor, &config, Box::new(terminal_confirm), output)
        .with_workdir(&workdir);
    let report = pipeline.run(&options).await;

    print_report(&report, &options, output);
    set_terminal_title(&format!("{} git-sync", report.outcome.symbol()));

    Ok(report.outcome.exit_code())
}

fn print_report(report: &SyncReport, options: &SyncOptions, output: Output) {
    match &report.outcome {
        PipelineOutcome::Success => {
            if options.dry_run {
                output.info(&format!(
                    "Dry run complete, {} command(s) would run",
                    report.planned.len()
                ));
            }
            if options.show_stats {
                println!("{}", report.stats.generate_summary());
            } else {
                output.success("Sync complete");
            }
        }
        PipelineOutcome::Cancelled => output.info("Sync cancelled"),
        PipelineOutcome::Failure(kind) => report_failure(kind, output),
    }
}

fn report_failure(kind: &FailureKind, output: Output) {
    output.error(&kind.to_string());

    if let FailureKind::ConfigInvalid(problems) = kind {
        for problem in problems {
            output.warn(problem);
        }
    }

    let shown = failure_output(kind, output.verbose);
    if let Some(text) = shown {
        output.excerpt(text);
    }
    if !output.verbose || shown.is_none() {
        output.hint(&kind.hint());
    }
}

/// Raw command output printed with a failure
///
/// A failing hook always shows what it printed. Git's own output is only
/// shown in verbose mode.
fn failure_output(kind: &FailureKind, verbose: bool) -> Option<&str> {
    match kind {
        FailureKind::HookFailed { .. } => kind.detail(),
        _ if verbose => kind.detail(),
        _ => None,
    }
}
