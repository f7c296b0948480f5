//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{add_git_remote, create_bare_remote, create_test_commit, git, setup_git_repo};

/// A test repository with automatic cleanup
pub struct TestRepo {
    pub temp_dir: TempDir,
    /// Bare repository registered as `origin`, if requested
    pub remote: Option<TempDir>,
}

impl TestRepo {
    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn remote_path(&self) -> Option<&Path> {
        self.remote.as_ref().map(TempDir::path)
    }

    /// Create a new file in the repository
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.path().join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Create a file of `size` bytes
    pub fn create_sized_file(&self, name: &str, size: usize) -> Result<PathBuf> {
        let file_path = self.path().join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, vec![b'x'; size])?;
        Ok(file_path)
    }

    pub fn git(&self, args: &[&str]) -> Result<String> {
        git(self.path(), args)
    }

    /// Subject line of the latest commit
    pub fn last_subject(&self) -> Result<String> {
        self.git(&["log", "-1", "--format=%s"])
    }
}

/// Builder for creating test repositories
pub struct TestRepoBuilder {
    with_remote: bool,
    with_upstream: bool,
    with_commits: usize,
    branch: Option<String>,
}

impl TestRepoBuilder {
    pub fn new() -> Self {
        Self {
            with_remote: false,
            with_upstream: false,
            with_commits: 1,
            branch: None,
        }
    }

    /// Register an empty bare repository as `origin`
    pub fn with_bare_remote(mut self) -> Self {
        self.with_remote = true;
        self
    }

    /// Push the initial history to `origin` and track it
    pub fn with_upstream(mut self) -> Self {
        self.with_remote = true;
        self.with_upstream = true;
        self
    }

    pub fn with_commits(mut self, count: usize) -> Self {
        self.with_commits = count;
        self
    }

    /// Check out a new branch after the initial commits
    pub fn on_branch(mut self, name: impl Into<String>) -> Self {
        self.branch = Some(name.into());
        self
    }

    pub fn build(self) -> Result<TestRepo> {
        let temp_dir = TempDir::new()?;
        setup_git_repo(temp_dir.path())?;

        create_test_commit(temp_dir.path(), "README.md", "# Test Repo", "Initial commit")?;
        for i in 1..self.with_commits {
            create_test_commit(
                temp_dir.path(),
                &format!("file{i}.txt"),
                &format!("content {i}"),
                &format!("Commit {i}"),
            )?;
        }

        let remote = if self.with_remote {
            let remote_dir = TempDir::new()?;
            create_bare_remote(remote_dir.path())?;
            let url = remote_dir.path().to_string_lossy().to_string();
            add_git_remote(temp_dir.path(), "origin", &url)?;
            Some(remote_dir)
        } else {
            None
        };

        if self.with_upstream {
            git(temp_dir.path(), &["push", "-u", "origin", "main"])?;
        }

        if let Some(branch) = &self.branch {
            git(temp_dir.path(), &["checkout", "-b", branch])?;
        }

        Ok(TestRepo { temp_dir, remote })
    }
}

impl Default for TestRepoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes a JSON manifest into a fresh temporary directory
pub fn manifest_dir(content: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("composer.json");
    std::fs::write(&path, content)?;
    Ok((temp_dir, path))
}
