//! External command execution
//!
//! Every git call and every hook goes through [`CommandExecutor`], so the
//! pipeline only ever sees an exit code and two text streams.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use tokio::process::Command;

/// Exit code reported when the process could not be spawned at all
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// What to run: a git argv or a shell line (used by hooks)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Git(Vec<String>),
    Shell(String),
}

impl Invocation {
    /// Builds a git invocation from string slices
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::Git(args.into_iter().map(Into::into).collect())
    }

    pub fn shell(line: impl Into<String>) -> Self {
        Invocation::Shell(line.into())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Git(args) => {
                write!(f, "git")?;
                for arg in args {
                    if arg.is_empty() || arg.contains(char::is_whitespace) {
                        write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
                    } else {
                        write!(f, " {arg}")?;
                    }
                }
                Ok(())
            }
            Invocation::Shell(line) => write!(f, "{line}"),
        }
    }
}

/// Result of one executed command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn successful(&self) -> bool {
        self.exit_code == 0
    }

    /// stderr followed by stdout, for classifiers that must see both streams
    pub fn combined_output(&self) -> String {
        match (self.stderr.is_empty(), self.stdout.is_empty()) {
            (true, _) => self.stdout.clone(),
            (false, true) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stderr, self.stdout),
        }
    }
}

/// Capability to run external commands in the repository
///
/// Implementations never fail: a non-zero exit or a spawn error is reported
/// through the returned [`CommandResult`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, invocation: &Invocation) -> CommandResult;
}

/// Runs commands as child processes in a fixed working directory
pub struct ProcessExecutor {
    cwd: PathBuf,
}

impl ProcessExecutor {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn command_for(&self, invocation: &Invocation) -> Command {
        let mut command = match invocation {
            Invocation::Git(args) => {
                let mut command = Command::new("git");
                command.args(args);
                command
            }
            Invocation::Shell(line) => shell_command(line),
        };
        command.current_dir(&self.cwd);
        command
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", line]);
    command
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.args(["-c", line]);
    command
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, invocation: &Invocation) -> CommandResult {
        tracing::debug!(command = %invocation, cwd = %self.cwd.display(), "executing");

        let result = match self.command_for(invocation).output().await {
            Ok(output) => CommandResult {
                // Killed by a signal: no code, report as a generic failure
                exit_code: output.status.code().unwrap_or(-1),
                // Leading whitespace is significant in porcelain output
                stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            },
            Err(e) => CommandResult::new(
                SPAWN_FAILURE_EXIT_CODE,
                "",
                format!("failed to run `{invocation}`: {e}"),
            ),
        };

        tracing::debug!(command = %invocation, exit_code = result.exit_code, "finished");
        result
    }
}
