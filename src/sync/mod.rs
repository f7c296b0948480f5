//! Staging, committing and publishing local changes.

pub mod hooks;
pub mod message;
pub mod options;
pub mod outcome;
pub mod pipeline;
pub mod safety;

pub use hooks::{HookError, HookFailure, HookReport, HookRunner};
pub use message::{advisory_warnings, build_commit_message, MessageError, MessageRequest, MessageWarning};
pub use options::{OperationMode, SyncOptions};
pub use outcome::{FailureKind, PipelineOutcome, SyncReport};
pub use pipeline::{ConfirmFn, SyncPipeline};
pub use safety::{check_file_sizes, check_protected_branch, ChangedFile, GateConcern, GateDecision};
