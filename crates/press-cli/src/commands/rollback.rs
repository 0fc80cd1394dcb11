//! Rollback and backup-listing commands
//!
//! Rollback is deliberately manual: it names the snapshot it found, asks for
//! confirmation, and only then overwrites the live file with the backup's
//! exact bytes.

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::Confirm;

use press_core::{BackupManager, Error, CONFIG_FILE};

use crate::context::ProjectContext;
use crate::error::Result;

/// Run the rollback command
pub fn run_rollback(path: &Path, component: &str, yes: bool) -> Result<()> {
    let ctx = ProjectContext::load(path)?;

    let (file_name, live_path) = resolve_component(&ctx, component)?;

    let manager = BackupManager::new(ctx.backups_dir());
    let snapshot = manager
        .latest_with(&file_name)?
        .ok_or_else(|| Error::NoBackup {
            component: file_name.clone(),
        })?;

    println!(
        "{} Found backup of {} from {}",
        "=>".blue().bold(),
        file_name.cyan(),
        snapshot
            .metadata
            .created
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .cyan()
    );

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {file_name} with this backup?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Rollback aborted.");
            return Ok(());
        }
    }

    manager.restore(&snapshot, &file_name, &live_path)?;
    ctx.audit().rollback(&format!(
        "Restored {} from snapshot {}",
        file_name, snapshot.label
    ));

    println!(
        "{} {} restored from snapshot {}.",
        "OK".green().bold(),
        file_name,
        snapshot.label
    );
    Ok(())
}

/// Run the backups command
pub fn run_backups(path: &Path) -> Result<()> {
    let ctx = ProjectContext::load(path)?;
    let manager = BackupManager::new(ctx.backups_dir());
    let snapshots = manager.list()?;

    if snapshots.is_empty() {
        println!("No backups yet. Run {} to create one.", "press sync".cyan());
        return Ok(());
    }

    println!("{} {} snapshot(s):", "=>".blue().bold(), snapshots.len());
    for snapshot in snapshots {
        println!(
            "   {} {} ({})",
            snapshot.label.cyan(),
            snapshot.metadata.files.join(", "),
            snapshot
                .metadata
                .created
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .dimmed()
        );
    }
    Ok(())
}

/// Map a component name to its backed-up file name and live path.
fn resolve_component(ctx: &ProjectContext, component: &str) -> Result<(String, PathBuf)> {
    match component {
        "content" => {
            let live = ctx.content_path();
            let name = live
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| ctx.config.content.source.clone());
            Ok((name, live))
        }
        "config" => Ok((CONFIG_FILE.to_string(), ctx.config_path())),
        other => Err(Error::UnknownComponent {
            name: other.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_minimal_project(dir: &Path) {
        fs::write(
            dir.join("press.toml"),
            "[site]\nbase_url = \"https://example.com\"\nusername = \"editor\"\n",
        )
        .unwrap();
        fs::write(dir.join("content.toml"), "[[records]]\ntitle = \"A\"\n").unwrap();
    }

    #[test]
    fn rollback_without_backups_fails_cleanly() {
        let temp = TempDir::new().unwrap();
        create_minimal_project(temp.path());

        let result = run_rollback(temp.path(), "content", true);
        assert!(result.is_err());

        // Live file untouched.
        let content = fs::read_to_string(temp.path().join("content.toml")).unwrap();
        assert!(content.contains("title = \"A\""));
    }

    #[test]
    fn rollback_unknown_component_is_rejected() {
        let temp = TempDir::new().unwrap();
        create_minimal_project(temp.path());

        let result = run_rollback(temp.path(), "database", true);
        assert!(result.is_err());
    }

    #[test]
    fn rollback_restores_exact_bytes() {
        let temp = TempDir::new().unwrap();
        create_minimal_project(temp.path());
        let content_path = temp.path().join("content.toml");
        let original = fs::read(&content_path).unwrap();

        // Snapshot, then clobber the live file.
        let ctx = ProjectContext::load(temp.path()).unwrap();
        let manager = BackupManager::new(ctx.backups_dir());
        manager.snapshot(&[content_path.clone()]).unwrap();
        fs::write(&content_path, "clobbered by a bad merge").unwrap();

        run_rollback(temp.path(), "content", true).unwrap();

        assert_eq!(fs::read(&content_path).unwrap(), original);

        // The rollback is in the audit trail.
        let changelog =
            fs::read_to_string(ctx.work_dir().join("changelog.txt")).unwrap();
        assert!(changelog.contains("[ROLLBACK] Restored content.toml"));
    }

    #[test]
    fn backups_listing_on_fresh_project() {
        let temp = TempDir::new().unwrap();
        create_minimal_project(temp.path());

        assert!(run_backups(temp.path()).is_ok());
    }
}
