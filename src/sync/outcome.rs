//! Result of a sync run

use thiserror::Error;

use crate::core::SyncStats;

/// Why a run failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FailureKind {
    #[error("Invalid configuration: {}", .0.join("; "))]
    ConfigInvalid(Vec<String>),

    #[error("Not a git repository")]
    NotARepository,

    #[error("Remote '{0}' is not configured")]
    NoRemote(String),

    #[error("Invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("--commit-only and --push-only cannot be used together")]
    ConflictingModes,

    #[error("Unknown commit type '{given}'")]
    UnknownCommitType { given: String, valid: Vec<String> },

    #[error("HEAD is detached{}", .0.as_ref().map(|c| format!(" at {c}")).unwrap_or_default())]
    DetachedHead(Option<String>),

    #[error("{stage} hook `{command}` failed with exit code {exit_code}")]
    HookFailed {
        stage: String,
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("Failed to stage changes")]
    StageFailed(String),

    #[error("Failed to commit changes")]
    CommitFailed(String),

    #[error("Commit was rejected by a pre-commit hook")]
    PreCommitHookRejected(String),

    #[error("Failed to pull from remote")]
    PullFailed(String),

    #[error("Merge conflict while pulling")]
    MergeConflict(String),

    #[error("Failed to push to remote")]
    PushFailed(String),

    #[error("Push rejected: the remote has changes you do not have")]
    NonFastForward(String),
}

impl FailureKind {
    /// What the user can do about it
    pub fn hint(&self) -> String {
        match self {
            FailureKind::ConfigInvalid(_) => {
                "Fix the listed fields in .git-sync.toml or the GIT_SYNC_* variables".to_string()
            }
            FailureKind::NotARepository => {
                "Run git-sync inside a git working tree, or create one with `git init`".to_string()
            }
            FailureKind::NoRemote(remote) => {
                format!("Add it with `git remote add {remote} <url>` or pass --remote")
            }
            FailureKind::InvalidBranchName(_) => {
                "Branch names start with a letter or digit and may contain / _ . -".to_string()
            }
            FailureKind::ConflictingModes => "Pick one of --commit-only or --push-only".to_string(),
            FailureKind::UnknownCommitType { valid, .. } if valid.is_empty() => {
                "Conventional commits are disabled; drop --type or enable them".to_string()
            }
            FailureKind::UnknownCommitType { valid, .. } => {
                format!("Valid types: {}", valid.join(", "))
            }
            FailureKind::DetachedHead(_) => {
                "Create a branch with `git switch -c <name>` or check out an existing one"
                    .to_string()
            }
            FailureKind::HookFailed { .. } => {
                "Fix the hook's complaints or adjust [hooks] in .git-sync.toml".to_string()
            }
            FailureKind::StageFailed(_) => {
                "Check file permissions and .gitignore; run with --verbose for git's output"
                    .to_string()
            }
            FailureKind::CommitFailed(_) => {
                "Check your git identity (user.name, user.email); run with --verbose for details"
                    .to_string()
            }
            FailureKind::PreCommitHookRejected(_) => {
                "Fix the issues reported by the pre-commit hook, then sync again".to_string()
            }
            FailureKind::PullFailed(_) => {
                "Check your network connection and remote access; run with --verbose for details"
                    .to_string()
            }
            FailureKind::MergeConflict(_) => {
                "Resolve the conflicts manually, commit the merge, then sync again".to_string()
            }
            FailureKind::PushFailed(_) => {
                "Check your network connection and push permissions; run with --verbose for details"
                    .to_string()
            }
            FailureKind::NonFastForward(_) => {
                "Pull first (git-sync --pull), then push again".to_string()
            }
        }
    }

    /// Raw tool output carried with the failure, if any
    pub fn detail(&self) -> Option<&str> {
        let text = match self {
            FailureKind::HookFailed { output, .. }
            | FailureKind::StageFailed(output)
            | FailureKind::CommitFailed(output)
            | FailureKind::PreCommitHookRejected(output)
            | FailureKind::PullFailed(output)
            | FailureKind::MergeConflict(output)
            | FailureKind::PushFailed(output)
            | FailureKind::NonFastForward(output) => output.as_str(),
            FailureKind::ConfigInvalid(_)
            | FailureKind::NotARepository
            | FailureKind::NoRemote(_)
            | FailureKind::InvalidBranchName(_)
            | FailureKind::ConflictingModes
            | FailureKind::UnknownCommitType { .. }
            | FailureKind::DetachedHead(_) => return None,
        };
        Some(text).filter(|text| !text.trim().is_empty())
    }
}

/// Final state of a run, decided exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success,
    Failure(FailureKind),
    Cancelled,
}

impl PipelineOutcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            PipelineOutcome::Success => "🟢",
            PipelineOutcome::Cancelled => "🟡",
            PipelineOutcome::Failure(_) => "🔴",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            PipelineOutcome::Success => "synced",
            PipelineOutcome::Cancelled => "cancelled",
            PipelineOutcome::Failure(_) => "failed",
        }
    }

    /// Process exit code: only failures are non-zero
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineOutcome::Failure(_) => 1,
            PipelineOutcome::Success | PipelineOutcome::Cancelled => 0,
        }
    }

    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            PipelineOutcome::Failure(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub outcome: PipelineOutcome,
    pub stats: SyncStats,
    /// Mutating commands and hooks a dry run would have executed, in order
    pub planned: Vec<String>,
    /// Advisory messages and warn-only hook failures
    pub warnings: Vec<String>,
}
