//! Sync configuration model and layered loading
//!
//! Files and environment variables are layered with figment and extracted
//! into [`SyncConfig`]; absent keys keep their built-in defaults.

use chrono::format::{Item, StrftimeItems};
use figment::error::Kind;
use figment::providers::{Env, Format, Toml};
use figment::value::{Uncased, UncasedStr};
use figment::Figment;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::config::{
    DEFAULT_COMMIT_PREFIX, DEFAULT_COMMIT_TYPES, DEFAULT_MAX_FILE_SIZE_MB,
    DEFAULT_PROTECTED_BRANCHES, DEFAULT_REMOTE, DEFAULT_TIMESTAMP_FORMAT, ENV_COMMIT_PREFIX,
    ENV_CONVENTIONAL_COMMITS, ENV_PREFIX, ENV_REMOTE, ENV_TIMESTAMP_FORMAT, REPO_CONFIG_FILE,
    USER_CONFIG_DIR, USER_CONFIG_FILE,
};

/// Environment variable → configuration key
const ENV_KEYS: [(&str, &str); 4] = [
    (ENV_COMMIT_PREFIX, "default_commit_prefix"),
    (ENV_TIMESTAMP_FORMAT, "timestamp_format"),
    (ENV_REMOTE, "default_remote"),
    (ENV_CONVENTIONAL_COMMITS, "conventional_commits.enabled"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields have the wrong type or an unusable value
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A source could not be read or parsed
    #[error("failed to load configuration: {0}")]
    Load(#[source] figment::Error),
}

/// Lifecycle points at which configured hook commands run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookStage {
    PreStage,
    PreCommit,
    PostCommit,
    PostPush,
}

impl HookStage {
    pub const ALL: [HookStage; 4] = [
        HookStage::PreStage,
        HookStage::PreCommit,
        HookStage::PostCommit,
        HookStage::PostPush,
    ];

    /// Configuration key under `[hooks]`
    pub fn key(&self) -> &'static str {
        match self {
            HookStage::PreStage => "pre_stage",
            HookStage::PreCommit => "pre_commit",
            HookStage::PostCommit => "post_commit",
            HookStage::PostPush => "post_push",
        }
    }

    /// Whether a failing command aborts the run
    pub fn fail_fast(&self) -> bool {
        matches!(self, HookStage::PreStage | HookStage::PreCommit)
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key().replace('_', "-"))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConventionalCommits {
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    /// type → description
    pub types: BTreeMap<String, String>,
}

impl Default for ConventionalCommits {
    fn default() -> Self {
        Self {
            enabled: true,
            types: DEFAULT_COMMIT_TYPES
                .iter()
                .map(|(name, description)| (name.to_string(), description.to_string()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Size limit in megabytes; 0 disables the check
    pub max_file_size: f64,
    pub protected_branches: Vec<String>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE_MB,
            protected_branches: DEFAULT_PROTECTED_BRANCHES
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    pub pre_stage: Vec<String>,
    pub pre_commit: Vec<String>,
    pub post_commit: Vec<String>,
    pub post_push: Vec<String>,
}

impl HooksConfig {
    pub fn commands(&self, stage: HookStage) -> &[String] {
        match stage {
            HookStage::PreStage => &self.pre_stage,
            HookStage::PreCommit => &self.pre_commit,
            HookStage::PostCommit => &self.post_commit,
            HookStage::PostPush => &self.post_push,
        }
    }
}

/// Everything the sync pipeline reads from configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub default_commit_prefix: String,
    /// strftime format used in generated commit messages
    pub timestamp_format: String,
    pub default_remote: String,
    pub conventional_commits: ConventionalCommits,
    pub safety_checks: SafetyConfig,
    pub hooks: HooksConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_commit_prefix: DEFAULT_COMMIT_PREFIX.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            default_remote: DEFAULT_REMOTE.to_string(),
            conventional_commits: ConventionalCommits::default(),
            safety_checks: SafetyConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Checks values a run cannot proceed with
    ///
    /// Returns every problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.default_remote.trim().is_empty() {
            problems.push("default_remote must be a non-empty string".to_string());
        }
        if self.default_commit_prefix.trim().is_empty() {
            problems.push("default_commit_prefix must be a non-empty string".to_string());
        }
        if !is_valid_timestamp_format(&self.timestamp_format) {
            problems.push(format!(
                "timestamp_format '{}' is not a valid strftime format",
                self.timestamp_format
            ));
        }
        let max = self.safety_checks.max_file_size;
        if !max.is_finite() || max < 0.0 {
            problems.push(format!(
                "safety_checks.max_file_size must be a non-negative number (got {max})"
            ));
        }
        for stage in HookStage::ALL {
            for (index, command) in self.hooks.commands(stage).iter().enumerate() {
                if command.trim().is_empty() {
                    problems.push(format!("hooks.{}[{}] is an empty command", stage.key(), index));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Returns true if chrono can format with `format` without error items
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.trim().is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`
///
/// Environment values arrive as numbers or strings, so a plain `bool` is
/// too strict for `GIT_SYNC_CONVENTIONAL_COMMITS`.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false, 1/0, yes/no, on/off)")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Signed(value), &self)),
            }
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Where to look for configuration files
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Repository working directory, searched for [`REPO_CONFIG_FILE`]
    pub workdir: PathBuf,
    /// Explicit file; replaces the user and repository files
    pub explicit: Option<PathBuf>,
    /// User config directory; `None` skips the user file
    pub user_config_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn for_workdir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            explicit: None,
            user_config_dir: dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR)),
        }
    }
}

/// Loads the layered configuration
///
/// Later sources win and tables merge key by key: defaults, user file,
/// repository file (or the explicit file instead of both), then
/// `GIT_SYNC_*` environment variables.
pub fn load_config(options: &LoadOptions) -> Result<SyncConfig, ConfigError> {
    let mut figment = Figment::new();

    for path in config_files(options)? {
        tracing::debug!(path = %path.display(), "loading configuration file");
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(env_overrides())
        .extract::<SyncConfig>()
        .map_err(into_config_error)
}

fn config_files(options: &LoadOptions) -> Result<Vec<PathBuf>, ConfigError> {
    if let Some(explicit) = &options.explicit {
        if !explicit.is_file() {
            return Err(ConfigError::NotFound(explicit.clone()));
        }
        return Ok(vec![explicit.clone()]);
    }

    let candidates = options
        .user_config_dir
        .iter()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .chain(std::iter::once(options.workdir.join(REPO_CONFIG_FILE)));

    Ok(candidates.filter(|path| path.is_file()).collect())
}

/// `GIT_SYNC_*` variables, renamed to the keys they override
fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX).map(env_key)
}

fn env_key(key: &UncasedStr) -> Uncased<'_> {
    ENV_KEYS
        .iter()
        .find(|(var, _)| {
            var.strip_prefix(ENV_PREFIX)
                .is_some_and(|suffix| key.as_str().eq_ignore_ascii_case(suffix))
        })
        .map_or_else(|| key.as_str().into(), |(_, field)| (*field).into())
}

/// Splits a figment error into type problems, or keeps it whole for a
/// source that failed to parse
fn into_config_error(error: figment::Error) -> ConfigError {
    let mut problems = Vec::new();
    for problem in error {
        if let Kind::Message(_) = problem.kind {
            return ConfigError::Load(problem);
        }
        problems.push(if problem.path.is_empty() {
            problem.kind.to_string()
        } else {
            format!("{}: {}", problem.path.join("."), problem.kind)
        });
    }
    ConfigError::Invalid(problems)
}
