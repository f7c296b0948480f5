//! Git operations used by the sync pipeline
//!
//! Read-only queries return parsed values; mutating operations return the raw
//! [`CommandResult`] so the caller can classify failures.

use super::executor::{CommandExecutor, CommandResult, Invocation};

// Git command arguments
const GIT_DIR_ARGS: &[&str] = &["rev-parse", "--git-dir"];
const GIT_REMOTE_ARGS: &[&str] = &["remote"];
const GIT_ADD_ALL_ARGS: &[&str] = &["add", "."];
// Every untracked file is listed on its own, not collapsed into its directory
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain", "-z", "--untracked-files=all"];
const GIT_STATUS_SHORT_ARGS: &[&str] = &["status", "--short"];
const GIT_DIFF_CACHED_ARGS: &[&str] = &["diff", "--cached", "--quiet"];
const GIT_DIFF_CACHED_STAT_ARGS: &[&str] = &["diff", "--cached", "--stat"];
const GIT_DIFF_CACHED_NUMSTAT_ARGS: &[&str] = &["diff", "--cached", "--numstat"];

fn git(args: &[&str]) -> Invocation {
    Invocation::git(args.iter().copied())
}

/// Invocation that stages every change in the working tree
pub fn stage_all_invocation() -> Invocation {
    git(GIT_ADD_ALL_ARGS)
}

pub fn commit_invocation(message: &str) -> Invocation {
    Invocation::git(["commit", "-m", message])
}

pub fn pull_invocation(remote: &str, branch: &str) -> Invocation {
    Invocation::git(["pull", remote, branch])
}

/// Push invocation; `set_upstream` adds `-u` to record the tracking branch
pub fn push_invocation(remote: &str, branch: &str, set_upstream: bool) -> Invocation {
    if set_upstream {
        Invocation::git(["push", "-u", remote, branch])
    } else {
        Invocation::git(["push", remote, branch])
    }
}

/// Returns true when the working directory is inside a git repository
pub async fn is_repository(executor: &dyn CommandExecutor) -> bool {
    executor.execute(&git(GIT_DIR_ARGS)).await.successful()
}

/// Lists the configured remotes
pub async fn list_remotes(executor: &dyn CommandExecutor) -> Vec<String> {
    let result = executor.execute(&git(GIT_REMOTE_ARGS)).await;
    if !result.successful() {
        return Vec::new();
    }
    result
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks if the index differs from HEAD
///
/// `git diff --cached --quiet` exits 0 when nothing is staged, so invert.
pub async fn has_staged_changes(executor: &dyn CommandExecutor) -> bool {
    !executor.execute(&git(GIT_DIFF_CACHED_ARGS)).await.successful()
}

/// Short status listing, for display
pub async fn short_status(executor: &dyn CommandExecutor) -> CommandResult {
    executor.execute(&git(GIT_STATUS_SHORT_ARGS)).await
}

/// Diffstat of the staged changes, for the interactive review
pub async fn staged_diff_summary(executor: &dyn CommandExecutor) -> CommandResult {
    executor.execute(&git(GIT_DIFF_CACHED_STAT_ARGS)).await
}

/// Per-file insertion/deletion counts of the staged changes
pub async fn staged_numstat(executor: &dyn CommandExecutor) -> CommandResult {
    executor.execute(&git(GIT_DIFF_CACHED_NUMSTAT_ARGS)).await
}

/// A path reported by `git status --porcelain -z`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    /// Two-letter porcelain code, e.g. ` M`, `??`, `D `
    pub code: String,
    pub path: String,
}

impl StatusEntry {
    pub fn is_deleted(&self) -> bool {
        self.code.contains('D')
    }
}

/// Lists changed paths in the working tree (staged, unstaged and untracked)
pub async fn changed_files(executor: &dyn CommandExecutor) -> Vec<StatusEntry> {
    let result = executor.execute(&git(GIT_STATUS_PORCELAIN_ARGS)).await;
    if !result.successful() {
        return Vec::new();
    }
    parse_porcelain(&result.stdout)
}

/// Parses NUL-separated `git status --porcelain -z` (v1) output
///
/// Paths arrive verbatim. A rename or copy is followed by a field holding
/// its source path, which is skipped so the entry reports the destination.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut fields = output.split('\0');

    while let Some(field) = fields.next() {
        let (Some(code), Some(path)) = (field.get(..2), field.get(3..)) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        if code.contains('R') || code.contains('C') {
            fields.next();
        }
        entries.push(StatusEntry {
            code: code.to_string(),
            path: path.to_string(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_porcelain_basic_codes() {
        let output = " M src/lib.rs\0?? notes.txt\0D  old.txt\0A  new.txt\0";
        let entries = parse_porcelain(output);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].code, " M");
        assert_eq!(entries[0].path, "src/lib.rs");
        assert_eq!(entries[1].path, "notes.txt");
        assert!(entries[2].is_deleted());
        assert!(!entries[3].is_deleted());
    }

    #[test]
    fn test_parse_porcelain_renames_use_destination() {
        let entries = parse_porcelain("R  after.txt\0before.txt\0 M other.txt\0");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "after.txt");
        assert_eq!(entries[1].path, "other.txt");
    }

    #[test]
    fn test_parse_porcelain_keeps_paths_verbatim() {
        let entries = parse_porcelain("?? with space.bin\0?? docs/résumé.pdf\0");
        assert_eq!(entries[0].path, "with space.bin");
        assert_eq!(entries[1].path, "docs/résumé.pdf");
    }

    #[test]
    fn test_parse_porcelain_ignores_blank_output() {
        assert!(parse_porcelain("").is_empty());
        assert!(parse_porcelain("\0").is_empty());
    }

    #[test]
    fn test_push_invocation_variants() {
        assert_eq!(
            push_invocation("origin", "main", false).to_string(),
            "git push origin main"
        );
        assert_eq!(
            push_invocation("origin", "main", true).to_string(),
            "git push -u origin main"
        );
    }
}
