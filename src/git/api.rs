//! Public API for git access.
//!
//! This module provides the stable public API for git-related functionality:
//! - The [`CommandExecutor`] capability and its process-backed implementation
//! - Branch resolution and branch-name validation
//! - Failure classification of git output
//!
//! ## Example: Resolving the current branch
//!
//! ```rust,no_run
//! use git_sync::git::{current_branch, ProcessExecutor};
//!
//! async fn show() {
//!     let executor = ProcessExecutor::new(".");
//!     match current_branch(&executor).await {
//!         Ok(branch) => println!("on {branch}"),
//!         Err(e) => println!("{e}"),
//!     }
//! }
//! ```

// Command execution
pub use super::executor::{
    CommandExecutor, CommandResult, Invocation, ProcessExecutor, SPAWN_FAILURE_EXIT_CODE,
};

// Branches
pub use super::branch::{current_branch, validate_branch_name, BranchError};

// Failure classification
pub use super::classify::{classify_failure, FailureClass};

// Operations used by the pipeline and integration tests
pub use super::operations::{
    changed_files, commit_invocation, has_staged_changes, is_repository, list_remotes,
    parse_porcelain, pull_invocation, push_invocation, short_status, stage_all_invocation,
    staged_diff_summary, staged_numstat, StatusEntry,
};
