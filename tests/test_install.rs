use anyhow::Result;
use git_sync::commands::{install_shortcut, InstallError, InstallOutcome};

mod common;
use common::manifest_dir;

fn never_asked(_: &str, _: bool) -> bool {
    panic!("confirmation should not be requested");
}

#[test]
fn test_adds_script_and_preserves_key_order() -> Result<()> {
    let (_dir, path) = manifest_dir(
        r#"{"name": "acme/app", "require": {"php": "^8.2"}, "scripts": {"test": "phpunit"}, "config": {}}"#,
    )?;

    let outcome = install_shortcut(&path, false, &never_asked)?;
    assert_eq!(outcome, InstallOutcome::Installed);

    let written = std::fs::read_to_string(&path)?;
    assert!(written.ends_with("}\n"));
    assert!(written.contains("\n    \"name\": \"acme/app\""));

    let name = written.find("\"name\"").expect("name key");
    let require = written.find("\"require\"").expect("require key");
    let scripts = written.find("\"scripts\"").expect("scripts key");
    let config = written.find("\"config\"").expect("config key");
    assert!(name < require && require < scripts && scripts < config);

    let manifest: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(manifest["scripts"]["sync"], "git-sync");
    assert_eq!(manifest["scripts"]["test"], "phpunit");
    Ok(())
}

#[test]
fn test_creates_scripts_section() -> Result<()> {
    let (_dir, path) = manifest_dir(r#"{"name": "acme/app"}"#)?;

    install_shortcut(&path, false, &never_asked)?;

    let manifest: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(manifest["scripts"]["sync"], "git-sync");
    Ok(())
}

#[test]
fn test_second_install_is_a_no_op() -> Result<()> {
    let (_dir, path) = manifest_dir(r#"{"name": "acme/app"}"#)?;
    install_shortcut(&path, false, &never_asked)?;
    let first = std::fs::read_to_string(&path)?;

    let outcome = install_shortcut(&path, false, &never_asked)?;

    assert_eq!(outcome, InstallOutcome::AlreadyConfigured);
    assert_eq!(std::fs::read_to_string(&path)?, first);
    Ok(())
}

#[test]
fn test_declining_keeps_existing_script() -> Result<()> {
    let original = r#"{"scripts": {"sync": "./bin/deploy"}}"#;
    let (_dir, path) = manifest_dir(original)?;

    let outcome = install_shortcut(&path, false, &|_, default| {
        assert!(!default, "overwrite should default to no");
        false
    })?;

    assert_eq!(
        outcome,
        InstallOutcome::Declined {
            existing: "./bin/deploy".to_string()
        }
    );
    assert_eq!(std::fs::read_to_string(&path)?, original);
    Ok(())
}

#[test]
fn test_confirming_replaces_existing_script() -> Result<()> {
    let (_dir, path) = manifest_dir(r#"{"scripts": {"sync": "./bin/deploy"}}"#)?;

    let outcome = install_shortcut(&path, false, &|_, _| true)?;

    assert_eq!(
        outcome,
        InstallOutcome::Replaced {
            previous: "./bin/deploy".to_string()
        }
    );
    let manifest: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(manifest["scripts"]["sync"], "git-sync");
    Ok(())
}

#[test]
fn test_force_skips_confirmation() -> Result<()> {
    let (_dir, path) = manifest_dir(r#"{"scripts": {"sync": ["a", "b"]}}"#)?;

    let outcome = install_shortcut(&path, true, &never_asked)?;

    assert!(matches!(outcome, InstallOutcome::Replaced { .. }));
    Ok(())
}

#[test]
fn test_missing_manifest() -> Result<()> {
    let dir = tempfile::TempDir::new()?;

    let result = install_shortcut(&dir.path().join("composer.json"), false, &never_asked);

    assert!(matches!(result, Err(InstallError::ManifestNotFound(_))));
    Ok(())
}

#[test]
fn test_invalid_json_is_reported_and_untouched() -> Result<()> {
    let (_dir, path) = manifest_dir("{ not json")?;

    let result = install_shortcut(&path, false, &never_asked);

    assert!(matches!(result, Err(InstallError::Parse { .. })));
    assert_eq!(std::fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

#[test]
fn test_non_object_scripts_is_an_error() -> Result<()> {
    let (_dir, path) = manifest_dir(r#"{"scripts": ["build"]}"#)?;

    let result = install_shortcut(&path, false, &never_asked);

    assert!(matches!(result, Err(InstallError::ScriptsNotAnObject(_))));
    Ok(())
}
