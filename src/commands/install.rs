//! Shortcut installation
//!
//! Registers a `sync` script in a JSON project manifest so the tool can be
//! run through the project's script runner.

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::{DEFAULT_MANIFEST, SHORTCUT_SCRIPT_COMMAND, SHORTCUT_SCRIPT_NAME};
use crate::utils::{terminal_confirm, Output};

const SCRIPTS_KEY: &str = "scripts";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", .0.display())]
    NotAnObject(PathBuf),

    #[error("`scripts` in {} is not an object", .0.display())]
    ScriptsNotAnObject(PathBuf),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    AlreadyConfigured,
    /// Replaced a different script of the same name
    Replaced { previous: String },
    /// User kept the existing script
    Declined { existing: String },
}

/// Sets `scripts.sync` in the manifest at `path`
///
/// A different existing script is replaced only if `force` is set or
/// `confirm` agrees. Key order of the manifest is preserved.
pub fn install_shortcut(
    path: &Path,
    force: bool,
    confirm: &dyn Fn(&str, bool) -> bool,
) -> Result<InstallOutcome, InstallError> {
    if !path.is_file() {
        return Err(InstallError::ManifestNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| InstallError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut manifest: Value = serde_json::from_str(&content).map_err(|source| InstallError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| InstallError::NotAnObject(path.to_path_buf()))?;
    let scripts = root
        .entry(SCRIPTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| InstallError::ScriptsNotAnObject(path.to_path_buf()))?;

    let outcome = match scripts.get(SHORTCUT_SCRIPT_NAME) {
        None => InstallOutcome::Installed,
        Some(Value::String(existing)) if existing == SHORTCUT_SCRIPT_COMMAND => {
            return Ok(InstallOutcome::AlreadyConfigured);
        }
        Some(existing) => {
            let existing = script_text(existing);
            let question = format!(
                "A '{SHORTCUT_SCRIPT_NAME}' script already exists ({existing}). Overwrite it?"
            );
            if !force && !confirm(&question, false) {
                return Ok(InstallOutcome::Declined { existing });
            }
            InstallOutcome::Replaced { previous: existing }
        }
    };

    scripts.insert(
        SHORTCUT_SCRIPT_NAME.to_string(),
        Value::String(SHORTCUT_SCRIPT_COMMAND.to_string()),
    );
    write_manifest(path, &manifest)?;
    Ok(outcome)
}

fn script_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn write_manifest(path: &Path, manifest: &Value) -> Result<(), InstallError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    manifest.serialize(&mut serializer)?;
    buffer.push(b'\n');

    std::fs::write(path, buffer).map_err(|source| InstallError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Handles the install subcommand
pub fn handle_install_command(manifest: Option<PathBuf>, force: bool, output: Output) -> Result<()> {
    let path = match manifest {
        Some(path) => path,
        None => std::env::current_dir()?.join(DEFAULT_MANIFEST),
    };

    match install_shortcut(&path, force, &terminal_confirm)? {
        InstallOutcome::Installed => output.success(&format!(
            "Added '{SHORTCUT_SCRIPT_NAME}' script to {}",
            path.display()
        )),
        InstallOutcome::AlreadyConfigured => output.info(&format!(
            "'{SHORTCUT_SCRIPT_NAME}' script is already configured in {}",
            path.display()
        )),
        InstallOutcome::Replaced { previous } => output.success(&format!(
            "Replaced '{SHORTCUT_SCRIPT_NAME}' script (was: {previous})"
        )),
        InstallOutcome::Declined { .. } => {
            output.info("Installation cancelled, existing script kept")
        }
    }

    Ok(())
}
