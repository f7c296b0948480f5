//! Per-run options

use super::outcome::FailureKind;

/// Which halves of the sync to perform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationMode {
    /// Stage, commit and push
    Full,
    CommitOnly,
    PushOnly,
}

impl OperationMode {
    pub fn commits(&self) -> bool {
        !matches!(self, OperationMode::PushOnly)
    }

    pub fn publishes(&self) -> bool {
        !matches!(self, OperationMode::CommitOnly)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub message: Option<String>,
    /// Conventional commit type, e.g. `feat`
    pub commit_type: Option<String>,
    /// Branch to publish instead of the current one
    pub branch: Option<String>,
    /// Remote to use instead of `default_remote`
    pub remote: Option<String>,
    pub dry_run: bool,
    pub pull: bool,
    pub interactive: bool,
    pub commit_only: bool,
    pub push_only: bool,
    pub show_status: bool,
    pub show_stats: bool,
    pub verbose: bool,
}

impl SyncOptions {
    pub fn mode(&self) -> Result<OperationMode, FailureKind> {
        match (self.commit_only, self.push_only) {
            (true, true) => Err(FailureKind::ConflictingModes),
            (true, false) => Ok(OperationMode::CommitOnly),
            (false, true) => Ok(OperationMode::PushOnly),
            (false, false) => Ok(OperationMode::Full),
        }
    }
}
