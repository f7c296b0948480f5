//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Layered configuration loading and validation
//! - Run statistics
//! - Configuration constants

// Configuration model and loading
pub use super::settings::{
    is_valid_timestamp_format, load_config, ConfigError, ConventionalCommits, HookStage,
    HooksConfig, LoadOptions, SafetyConfig, SyncConfig,
};

// Statistics
pub use super::stats::{parse_numstat, SyncStats};

// Configuration constants
pub use super::config::{
    DEFAULT_COMMIT_PREFIX, DEFAULT_MANIFEST, DEFAULT_REMOTE, DEFAULT_TIMESTAMP_FORMAT,
    ENV_COMMIT_PREFIX, ENV_CONVENTIONAL_COMMITS, ENV_PREFIX, ENV_REMOTE, ENV_TIMESTAMP_FORMAT,
    REPO_CONFIG_FILE, USER_CONFIG_FILE, SHORTCUT_SCRIPT_COMMAND, SHORTCUT_SCRIPT_NAME,
};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, terminal_confirm};
