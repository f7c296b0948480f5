//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;
pub mod scripted;

pub use self::fixtures::{manifest_dir, TestRepo, TestRepoBuilder};
pub use self::git::{commit_count, git, is_git_available, setup_git_repo};
pub use self::scripted::{
    accept_default, answer, fail, ok, recording, ScriptedExecutor, PORCELAIN_STATUS,
};

use chrono::{NaiveDate, NaiveDateTime};
use git_sync::core::SyncConfig;
use git_sync::sync::{ConfirmFn, SyncOptions, SyncPipeline, SyncReport};
use git_sync::utils::Output;
use std::sync::{Mutex, MutexGuard, OnceLock};

static TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquires a global lock for tests that modify process-wide state (like CWD)
pub fn lock_test() -> MutexGuard<'static, ()> {
    TEST_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Fixed clock for commit messages: 2024-03-09 14:05
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|date| date.and_hms_opt(14, 5, 0))
        .expect("valid fixed date")
}

/// Runs the pipeline against a scripted executor with silent output
///
/// File sizes are read from a directory that does not exist, so the
/// large-file gate never triggers unless a test sets up a real workdir.
pub async fn run_scripted(
    executor: &ScriptedExecutor,
    config: &SyncConfig,
    confirm: ConfirmFn,
    options: &SyncOptions,
) -> SyncReport {
    SyncPipeline::new(executor, config, confirm, Output::silent())
        .with_workdir(std::env::temp_dir().join("git-sync-no-such-workdir"))
        .with_now(fixed_now())
        .run(options)
        .await
}
