//! Command handlers behind the CLI

pub mod install;
pub mod sync;

pub use install::{handle_install_command, install_shortcut, InstallError, InstallOutcome};
pub use sync::handle_sync_command;
