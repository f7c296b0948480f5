//! Configuration constants and defaults

// Configuration files
//
// Settings are layered: built-in defaults, then the user file, then the
// repository file, then environment variables.
pub const REPO_CONFIG_FILE: &str = ".git-sync.toml";
pub const USER_CONFIG_DIR: &str = "git-sync";
pub const USER_CONFIG_FILE: &str = "config.toml";

// Environment overrides
pub const ENV_PREFIX: &str = "GIT_SYNC_";
pub const ENV_COMMIT_PREFIX: &str = "GIT_SYNC_COMMIT_PREFIX";
pub const ENV_TIMESTAMP_FORMAT: &str = "GIT_SYNC_TIMESTAMP_FORMAT";
pub const ENV_REMOTE: &str = "GIT_SYNC_REMOTE";
pub const ENV_CONVENTIONAL_COMMITS: &str = "GIT_SYNC_CONVENTIONAL_COMMITS";

// Defaults
pub const DEFAULT_COMMIT_PREFIX: &str = "chore";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;
pub const DEFAULT_PROTECTED_BRANCHES: &[&str] = &["main", "master", "production"];

/// Conventional commit types enabled out of the box
pub const DEFAULT_COMMIT_TYPES: &[(&str, &str)] = &[
    ("feat", "A new feature"),
    ("fix", "A bug fix"),
    ("docs", "Documentation only changes"),
    ("style", "Changes that do not affect the meaning of the code"),
    ("refactor", "A code change that neither fixes a bug nor adds a feature"),
    ("perf", "A code change that improves performance"),
    ("test", "Adding missing tests or correcting existing tests"),
    ("build", "Changes that affect the build system or external dependencies"),
    ("ci", "Changes to CI configuration files and scripts"),
    ("chore", "Other changes that don't modify src or test files"),
    ("revert", "Reverts a previous commit"),
];

// Commit message advisories
pub const MIN_MESSAGE_LENGTH: usize = 3;
pub const MAX_SUBJECT_LENGTH: usize = 72;

// Display limits
pub const LARGE_FILES_DISPLAY_LIMIT: usize = 10;
pub const PATH_DISPLAY_WIDTH: usize = 50;
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// Shortcut installation
pub const DEFAULT_MANIFEST: &str = "composer.json";
pub const SHORTCUT_SCRIPT_NAME: &str = "sync";
pub const SHORTCUT_SCRIPT_COMMAND: &str = "git-sync";
