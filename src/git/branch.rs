//! Branch resolution and branch-name validation

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::executor::{CommandExecutor, Invocation};

const GIT_SHOW_CURRENT_ARGS: &[&str] = &["branch", "--show-current"];
const GIT_SHORT_HEAD_ARGS: &[&str] = &["rev-parse", "--short", "HEAD"];

/// Characters git refuses in ref names, beyond the base pattern
const FORBIDDEN_BRANCH_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '['];

static BRANCH_NAME_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BranchError {
    /// HEAD points at a commit, not a branch
    #[error("HEAD is detached{}", .0.as_ref().map(|c| format!(" at {c}")).unwrap_or_default())]
    DetachedHead(Option<String>),
}

/// Resolves the branch HEAD currently points at
///
/// An empty answer from git means a detached HEAD; the short commit id is
/// looked up only to make the diagnostic useful.
pub async fn current_branch(executor: &dyn CommandExecutor) -> Result<String, BranchError> {
    let result = executor.execute(&Invocation::git(GIT_SHOW_CURRENT_ARGS.iter().copied())).await;
    let branch = result.stdout.trim();

    if result.successful() && !branch.is_empty() {
        return Ok(branch.to_string());
    }

    let head = executor.execute(&Invocation::git(GIT_SHORT_HEAD_ARGS.iter().copied())).await;
    let commit = Some(head.stdout.trim())
        .filter(|commit| head.successful() && !commit.is_empty())
        .map(str::to_string);

    tracing::debug!(?commit, "detached HEAD");
    Err(BranchError::DetachedHead(commit))
}

/// Checks a user-supplied branch name against git's ref-naming restrictions
///
/// Names must start with an alphanumeric character and continue with
/// alphanumerics, `/`, `_`, `.` or `-`; `..` is rejected as well.
pub fn validate_branch_name(name: &str) -> bool {
    let pattern = BRANCH_NAME_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_.\-]*$").ok());

    pattern.as_ref().is_some_and(|p| p.is_match(name))
        && !name.contains("..")
        && !name.contains(FORBIDDEN_BRANCH_CHARS)
}
