//! User-configured commands run at fixed points of a sync

use thiserror::Error;

use crate::core::HookStage;
use crate::git::{CommandExecutor, Invocation};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("{stage} hook `{command}` failed with exit code {exit_code}")]
    Failed {
        stage: HookStage,
        command: String,
        exit_code: i32,
        output: String,
    },
}

/// A warn-only hook that exited non-zero
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookFailure {
    pub command: String,
    pub exit_code: i32,
    pub output: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookReport {
    pub executed: usize,
    pub failures: Vec<HookFailure>,
}

pub struct HookRunner<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> HookRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Runs `commands` in order as shell lines
    ///
    /// With `fail_fast` the first non-zero exit stops the stage and is
    /// returned as an error; otherwise every command runs and failures are
    /// collected in the report.
    pub async fn run_stage(
        &self,
        stage: HookStage,
        commands: &[String],
        fail_fast: bool,
    ) -> Result<HookReport, HookError> {
        let mut report = HookReport::default();

        for command in commands {
            tracing::info!(%stage, %command, "running hook");
            let result = self.executor.execute(&Invocation::shell(command.as_str())).await;
            report.executed += 1;

            if result.successful() {
                continue;
            }

            if fail_fast {
                return Err(HookError::Failed {
                    stage,
                    command: command.clone(),
                    exit_code: result.exit_code,
                    output: result.combined_output(),
                });
            }

            tracing::warn!(%stage, %command, exit_code = result.exit_code, "hook failed");
            report.failures.push(HookFailure {
                command: command.clone(),
                exit_code: result.exit_code,
                output: result.combined_output(),
            });
        }

        Ok(report)
    }
}
