//! # git-sync
//!
//! `git-sync` stages, commits and publishes local changes in one step,
//! guarded by configurable safety checks and user hooks. It powers the
//! `git-sync` CLI tool.
//!
//! ## Core Features
//!
//! - **Safety Gates**: Confirmation before syncing protected branches or staging large files.
//! - **Commit Messages**: Conventional-commit types, or a configurable prefix and timestamp.
//! - **Hooks**: Shell commands before staging, before and after committing, and after pushing.
//! - **Failure Guidance**: Git failures are classified into actionable hints.
//! - **Dry Runs**: Every mutating command is reported instead of executed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use git_sync::core::SyncConfig;
//! use git_sync::git::ProcessExecutor;
//! use git_sync::sync::{SyncOptions, SyncPipeline};
//! use git_sync::utils::Output;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SyncConfig::default();
//!     let executor = ProcessExecutor::new(".");
//!     let pipeline = SyncPipeline::new(&executor, &config, Box::new(|_, default| default), Output::silent());
//!
//!     let options = SyncOptions { dry_run: true, ..Default::default() };
//!     let report = pipeline.run(&options).await;
//!     println!("{} {}", report.outcome.symbol(), report.outcome.text());
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod sync;
pub mod utils;
