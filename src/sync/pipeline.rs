//! The sync pipeline: stage, commit and publish local changes
//!
//! Commands run one at a time through the injected [`CommandExecutor`].
//! Every mutating command goes through [`SyncPipeline::mutate`], which in
//! dry-run mode records the invocation instead of executing it.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::time::Instant;

use super::hooks::{HookError, HookRunner};
use super::message::{advisory_warnings, build_commit_message, check_commit_type, MessageError, MessageRequest};
use super::options::{OperationMode, SyncOptions};
use super::outcome::{FailureKind, PipelineOutcome, SyncReport};
use super::safety::{check_file_sizes, check_protected_branch, megabytes, ChangedFile, GateConcern, GateDecision};
use crate::core::config::{LARGE_FILES_DISPLAY_LIMIT, PATH_DISPLAY_WIDTH};
use crate::core::{HookStage, SyncConfig, SyncStats};
use crate::git::{
    changed_files, classify_failure, commit_invocation, current_branch, has_staged_changes,
    is_repository, list_remotes, pull_invocation, push_invocation, short_status,
    stage_all_invocation, staged_diff_summary, staged_numstat, validate_branch_name, BranchError,
    CommandExecutor, CommandResult, FailureClass, Invocation,
};
use crate::utils::{file_size, shorten_path, Output};

/// Synchronous yes/no prompt: `(question, default) -> answer`
pub type ConfirmFn = Box<dyn Fn(&str, bool) -> bool + Send + Sync>;

/// Why the pipeline stopped before the end
enum Stop {
    Failed(FailureKind),
    Cancelled,
}

impl From<FailureKind> for Stop {
    fn from(kind: FailureKind) -> Self {
        Stop::Failed(kind)
    }
}

impl From<HookError> for Stop {
    fn from(error: HookError) -> Self {
        let HookError::Failed {
            stage,
            command,
            exit_code,
            output,
        } = error;
        Stop::Failed(FailureKind::HookFailed {
            stage: stage.to_string(),
            command,
            exit_code,
            output,
        })
    }
}

enum CommitPhase {
    Committed,
    NothingToCommit,
}

/// Accumulated while a run progresses
#[derive(Default)]
struct RunState {
    stats: SyncStats,
    planned: Vec<String>,
    warnings: Vec<String>,
}

pub struct SyncPipeline<'a> {
    executor: &'a dyn CommandExecutor,
    config: &'a SyncConfig,
    confirm: ConfirmFn,
    output: Output,
    workdir: PathBuf,
    now: Option<NaiveDateTime>,
}

impl<'a> SyncPipeline<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        config: &'a SyncConfig,
        confirm: ConfirmFn,
        output: Output,
    ) -> Self {
        Self {
            executor,
            config,
            confirm,
            output,
            workdir: PathBuf::from("."),
            now: None,
        }
    }

    /// Directory used to read file sizes for the large-file check
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Fixes the time used in generated commit messages
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub async fn run(&self, options: &SyncOptions) -> SyncReport {
        let started = Instant::now();
        let mut state = RunState::default();

        let outcome = match self.execute(options, &mut state).await {
            Ok(()) => PipelineOutcome::Success,
            Err(Stop::Cancelled) => PipelineOutcome::Cancelled,
            Err(Stop::Failed(kind)) => PipelineOutcome::Failure(kind),
        };
        tracing::info!(outcome = outcome.text(), "sync finished");

        state.stats.duration = started.elapsed();
        SyncReport {
            outcome,
            stats: state.stats,
            planned: state.planned,
            warnings: state.warnings,
        }
    }

    async fn execute(&self, options: &SyncOptions, state: &mut RunState) -> Result<(), Stop> {
        let mode = self.validate_options(options)?;
        self.config.validate().map_err(FailureKind::ConfigInvalid)?;

        let remote = options
            .remote
            .as_deref()
            .filter(|remote| !remote.trim().is_empty())
            .unwrap_or(&self.config.default_remote)
            .to_string();

        tracing::info!(?mode, %remote, dry_run = options.dry_run, "starting sync");
        if !is_repository(self.executor).await {
            return Err(FailureKind::NotARepository.into());
        }

        let current = current_branch(self.executor)
            .await
            .map_err(|BranchError::DetachedHead(commit)| FailureKind::DetachedHead(commit))?;
        let target = options.branch.clone().unwrap_or_else(|| current.clone());
        tracing::info!(%current, %target, "resolved branch");

        let protected = &self.config.safety_checks.protected_branches;
        self.gate(check_protected_branch(&current, protected), options, state)?;
        if target != current {
            self.gate(check_protected_branch(&target, protected), options, state)?;
        }

        if options.show_status {
            let status = short_status(self.executor).await;
            self.output.info(&format!("Status of '{current}':"));
            self.output.block(&status.stdout);
        }

        if mode.commits() {
            if let CommitPhase::NothingToCommit = self.commit(options, state).await? {
                return Ok(());
            }
            if !mode.publishes() {
                self.output.success("Changes committed");
                return Ok(());
            }
        }

        self.publish(options, &remote, &target, state).await
    }

    /// Checks everything that needs no command to be run
    fn validate_options(&self, options: &SyncOptions) -> Result<OperationMode, FailureKind> {
        let mode = options.mode()?;

        if let Some(branch) = &options.branch {
            if !validate_branch_name(branch) {
                return Err(FailureKind::InvalidBranchName(branch.clone()));
            }
        }

        if let (true, Some(kind)) = (mode.commits(), options.commit_type.as_deref()) {
            let commits = &self.config.conventional_commits;
            check_commit_type(kind, &commits.types, commits.enabled).map_err(message_failure)?;
        }

        Ok(mode)
    }

    async fn commit(&self, options: &SyncOptions, state: &mut RunState) -> Result<CommitPhase, Stop> {
        self.run_hooks(HookStage::PreStage, options, state).await?;

        self.output.step("Staging changes...");
        let changed = changed_files(self.executor).await;
        let files: Vec<ChangedFile> = changed
            .iter()
            .map(|entry| ChangedFile {
                path: entry.path.clone(),
                size_bytes: if entry.is_deleted() {
                    None
                } else {
                    file_size(&self.workdir, &entry.path)
                },
            })
            .collect();
        self.gate(
            check_file_sizes(&files, self.config.safety_checks.max_file_size),
            options,
            state,
        )?;

        if let Some(result) = self.mutate(stage_all_invocation(), options, state).await {
            if !result.successful() {
                return Err(FailureKind::StageFailed(result.combined_output()).into());
            }
            if options.verbose {
                self.output.block(&short_status(self.executor).await.stdout);
            }
            self.output.success("Changes staged");
        }

        let has_changes = if options.dry_run {
            !changed.is_empty()
        } else {
            has_staged_changes(self.executor).await
        };
        if !has_changes {
            tracing::info!("nothing staged");
            self.output.info("No changes to commit. Working tree is clean.");
            return Ok(CommitPhase::NothingToCommit);
        }

        if options.dry_run {
            state.stats.files_changed = changed.len();
        } else {
            let numstat = staged_numstat(self.executor).await;
            if numstat.successful() {
                state.stats.record_numstat(&numstat.stdout);
            }
        }

        if options.interactive && !options.dry_run {
            let summary = staged_diff_summary(self.executor).await;
            self.output.info("Staged changes:");
            self.output.block(&summary.stdout);
            if !(self.confirm)("Proceed with commit?", true) {
                self.warn(state, "Commit cancelled, changes are staged but not committed".to_string());
                return Err(Stop::Cancelled);
            }
        }

        self.run_hooks(HookStage::PreCommit, options, state).await?;

        let message = self.commit_message(options)?;
        for warning in advisory_warnings(&message) {
            self.warn(state, warning.text());
        }

        self.output.step("Committing changes...");
        if let Some(result) = self.mutate(commit_invocation(&message), options, state).await {
            if !result.successful() {
                let output = result.combined_output();
                return Err(match classify_failure(&result.stderr) {
                    FailureClass::PreCommitHookRejected => FailureKind::PreCommitHookRejected(output),
                    _ => FailureKind::CommitFailed(output),
                }
                .into());
            }
            state.stats.committed = true;
            self.output.success(&format!("Committed: {message}"));
        }

        self.run_hooks(HookStage::PostCommit, options, state).await?;
        Ok(CommitPhase::Committed)
    }

    fn commit_message(&self, options: &SyncOptions) -> Result<String, FailureKind> {
        let commits = &self.config.conventional_commits;
        let request = MessageRequest {
            explicit: options.message.as_deref(),
            conventional_type: options.commit_type.as_deref(),
            types: &commits.types,
            conventional_enabled: commits.enabled,
            prefix: &self.config.default_commit_prefix,
            timestamp_format: &self.config.timestamp_format,
            now: self.now.unwrap_or_else(|| chrono::Local::now().naive_local()),
        };
        build_commit_message(&request).map_err(message_failure)
    }

    async fn publish(
        &self,
        options: &SyncOptions,
        remote: &str,
        branch: &str,
        state: &mut RunState,
    ) -> Result<(), Stop> {
        if !list_remotes(self.executor).await.iter().any(|name| name == remote) {
            return Err(FailureKind::NoRemote(remote.to_string()).into());
        }

        if options.pull {
            self.output.step(&format!("Pulling from {remote}/{branch}..."));
            let spinner = self.output.spinner(&format!("Pulling {branch}"));
            let pulled = self.mutate(pull_invocation(remote, branch), options, state).await;
            spinner.finish_and_clear();

            if let Some(result) = pulled {
                if !result.successful() {
                    let output = result.combined_output();
                    return Err(match classify_failure(&output) {
                        FailureClass::MergeConflict => FailureKind::MergeConflict(output),
                        _ => FailureKind::PullFailed(output),
                    }
                    .into());
                }
                state.stats.pulled = true;
                self.output.success("Pulled latest changes");
            }
        }

        self.output.step(&format!("Pushing to {remote}/{branch}..."));
        let spinner = self.output.spinner(&format!("Pushing {branch}"));
        let pushed = self.push(options, remote, branch, state).await;
        spinner.finish_and_clear();
        pushed?;

        self.run_hooks(HookStage::PostPush, options, state).await
    }

    async fn push(
        &self,
        options: &SyncOptions,
        remote: &str,
        branch: &str,
        state: &mut RunState,
    ) -> Result<(), Stop> {
        let Some(result) = self.mutate(push_invocation(remote, branch, false), options, state).await
        else {
            return Ok(());
        };

        let result = if result.successful() {
            result
        } else {
            match classify_failure(&result.stderr) {
                FailureClass::NoUpstreamBranch => {
                    tracing::info!(%remote, %branch, "no upstream, retrying with -u");
                    self.output.step("Setting upstream branch...");
                    let retry = self.executor.execute(&push_invocation(remote, branch, true)).await;
                    if retry.successful() {
                        state.stats.upstream_set = true;
                    }
                    retry
                }
                _ => result,
            }
        };

        if !result.successful() {
            let output = result.combined_output();
            return Err(match classify_failure(&result.stderr) {
                FailureClass::NonFastForward => FailureKind::NonFastForward(output),
                _ => FailureKind::PushFailed(output),
            }
            .into());
        }

        state.stats.pushed = true;
        self.output.success(&format!("Pushed to {remote}/{branch}"));
        Ok(())
    }

    /// Executes a mutating command, or records it in dry-run mode
    async fn mutate(
        &self,
        invocation: Invocation,
        options: &SyncOptions,
        state: &mut RunState,
    ) -> Option<CommandResult> {
        if options.dry_run {
            let line = invocation.to_string();
            self.output.dry_run(&line);
            state.planned.push(line);
            return None;
        }
        Some(self.executor.execute(&invocation).await)
    }

    async fn run_hooks(
        &self,
        stage: HookStage,
        options: &SyncOptions,
        state: &mut RunState,
    ) -> Result<(), Stop> {
        let commands = self.config.hooks.commands(stage);
        if commands.is_empty() {
            return Ok(());
        }

        if options.dry_run {
            for command in commands {
                let line = format!("{stage} hook: {command}");
                self.output.dry_run(&line);
                state.planned.push(line);
            }
            return Ok(());
        }

        self.output.step(&format!("Running {stage} hooks..."));
        let report = HookRunner::new(self.executor)
            .run_stage(stage, commands, stage.fail_fast())
            .await?;
        for failure in report.failures {
            self.output.detail(&failure.output);
            self.warn(
                state,
                format!(
                    "{stage} hook `{}` failed with exit code {}",
                    failure.command, failure.exit_code
                ),
            );
        }
        Ok(())
    }

    /// Turns a gate concern into a prompt (default no); dry runs never prompt
    fn gate(
        &self,
        decision: GateDecision,
        options: &SyncOptions,
        state: &mut RunState,
    ) -> Result<(), Stop> {
        let GateDecision::NeedsConfirmation(concern) = decision else {
            return Ok(());
        };

        let question = match concern {
            GateConcern::ProtectedBranch(branch) => {
                self.output.warn(&format!("'{branch}' is a protected branch"));
                format!("Continue syncing protected branch '{branch}'?")
            }
            GateConcern::LargeFiles(files) => {
                self.output.warn(&format!(
                    "{} file(s) exceed {} MB:",
                    files.len(),
                    self.config.safety_checks.max_file_size
                ));
                for file in files.iter().take(LARGE_FILES_DISPLAY_LIMIT) {
                    let size = megabytes(file.size_bytes.unwrap_or_default());
                    self.output.block(&format!(
                        "{} ({size:.1} MB)",
                        shorten_path(&file.path, PATH_DISPLAY_WIDTH)
                    ));
                }
                if files.len() > LARGE_FILES_DISPLAY_LIMIT {
                    self.output
                        .block(&format!("... and {} more", files.len() - LARGE_FILES_DISPLAY_LIMIT));
                }
                "Stage these large files anyway?".to_string()
            }
        };

        if options.dry_run {
            self.warn(state, format!("Would ask: {question}"));
            return Ok(());
        }
        if (self.confirm)(&question, false) {
            Ok(())
        } else {
            self.output.info("Nothing was staged or committed");
            Err(Stop::Cancelled)
        }
    }

    fn warn(&self, state: &mut RunState, message: String) {
        self.output.warn(&message);
        state.warnings.push(message);
    }
}

fn message_failure(error: MessageError) -> FailureKind {
    match error {
        MessageError::UnknownCommitType { given, valid } => {
            FailureKind::UnknownCommitType { given, valid }
        }
        MessageError::InvalidTimestampFormat(format) => {
            FailureKind::ConfigInvalid(vec![format!("invalid timestamp format '{format}'")])
        }
    }
}
