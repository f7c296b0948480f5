//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Runs git in `path` and returns trimmed stdout, failing on a non-zero exit
pub fn git(path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(path).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Sets up a git repository on branch `main` with user config
/// Returns Ok(()) on success, or skips test if git is not available
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init_result = Command::new("git")
        .args(["init"])
        .current_dir(path)
        .output()?;

    if !init_result.status.success() {
        anyhow::bail!("Git not available - skipping test");
    }

    // Independent of init.defaultBranch
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;

    // Disable commit signing and global hooks for tests
    git(path, &["config", "commit.gpgsign", "false"])?;
    git(path, &["config", "core.hooksPath", ".git/hooks"])?;
    git(path, &["config", "pull.rebase", "false"])?;

    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "-m", message])?;
    Ok(())
}

/// Creates a bare repository to push to
pub fn create_bare_remote(path: &Path) -> Result<()> {
    git(path, &["init", "--bare"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    Ok(())
}

/// Clones `source` into `target` and applies the test user config
pub fn clone_repo(source: &Path, target: &Path) -> Result<()> {
    let parent = target.parent().unwrap_or(target);
    git(
        parent,
        &["clone", &source.to_string_lossy(), &target.to_string_lossy()],
    )?;
    git(target, &["config", "user.name", "Other User"])?;
    git(target, &["config", "user.email", "other@example.com"])?;
    git(target, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Adds a git remote to a repository
pub fn add_git_remote(path: &Path, remote_name: &str, url: &str) -> Result<()> {
    git(path, &["remote", "add", remote_name, url]).map(|_| ())
}

/// Number of commits reachable from `reference`
pub fn commit_count(path: &Path, reference: &str) -> Result<usize> {
    Ok(git(path, &["rev-list", "--count", reference])?.parse()?)
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
