//! Safety gates checked before mutating the repository
//!
//! The checks are pure: the pipeline gathers the branch name and file sizes,
//! and turns a [`GateDecision::NeedsConfirmation`] into a prompt.

use crate::core::config::BYTES_PER_MB;

/// A path from the working-tree status together with its size on disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    /// `None` when the file is no longer on disk
    pub size_bytes: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateConcern {
    ProtectedBranch(String),
    /// Every file above the limit, in status order
    LargeFiles(Vec<ChangedFile>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    NeedsConfirmation(GateConcern),
}

pub fn check_protected_branch(branch: &str, protected: &[String]) -> GateDecision {
    if protected.iter().any(|name| name == branch) {
        GateDecision::NeedsConfirmation(GateConcern::ProtectedBranch(branch.to_string()))
    } else {
        GateDecision::Pass
    }
}

/// Flags files larger than `max_mb` megabytes; `max_mb <= 0` disables the check
pub fn check_file_sizes(files: &[ChangedFile], max_mb: f64) -> GateDecision {
    if max_mb <= 0.0 || !max_mb.is_finite() {
        return GateDecision::Pass;
    }

    let limit = max_mb * BYTES_PER_MB;
    let oversized: Vec<ChangedFile> = files
        .iter()
        .filter(|file| matches!(file.size_bytes, Some(size) if size as f64 > limit))
        .cloned()
        .collect();

    if oversized.is_empty() {
        GateDecision::Pass
    } else {
        GateDecision::NeedsConfirmation(GateConcern::LargeFiles(oversized))
    }
}

/// Size in megabytes, for display
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}
