//! Sync and check command implementations
//!
//! `sync` performs a full reconciliation run: backup, integrity check,
//! prefetch, then the per-record loop. `check` is the read-only preview of
//! the same decisions.

use std::fs;
use std::path::Path;

use colored::Colorize;

use press_core::{
    BackupManager, ContentSet, IntegrityMonitor, StateStore, SyncEngine, SyncOptions, SyncReport,
};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// Run the sync command
pub async fn run_sync(path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let ctx = ProjectContext::load(path)?;
    let content = ContentSet::load(&ctx.content_path())?;

    if !json {
        let mode = if dry_run { " (dry run)" } else { "" };
        println!(
            "{} Reconciling {} records -> {}{}",
            "=>".blue().bold(),
            content.records.len(),
            ctx.config.site.base_url.cyan(),
            mode
        );
        for warning in content.governance_warnings() {
            println!("   {} {}", "!".yellow(), warning);
        }
    }

    let audit = ctx.audit();

    if !dry_run {
        fs::create_dir_all(ctx.work_dir())?;

        // Snapshot the authoritative files before anything can overwrite
        // production content derived from them.
        let manager = BackupManager::new(ctx.backups_dir());
        let snapshot = manager.snapshot(&[ctx.content_path(), ctx.config_path()])?;
        if !json {
            println!(
                "   {} Backed up {} file(s) to {}",
                "+".green(),
                snapshot.metadata.files.len(),
                snapshot.label.dimmed()
            );
        }

        let monitor = IntegrityMonitor::new(
            ctx.integrity_path(),
            ctx.config.tracked_paths(&ctx.root),
        );
        let changed = monitor.check()?;
        if !changed.is_empty() {
            audit.code_update(&changed);
            if !json {
                println!(
                    "   {} System update detected: {}",
                    "!".yellow(),
                    changed.join(", ")
                );
            }
        }
    }

    let client = ctx.client()?;
    let state = StateStore::load(ctx.state_path());
    let mut engine = SyncEngine::new(&client, state, audit).await?;
    let report = engine.sync(&content.records, &SyncOptions { dry_run }).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::user("Synchronization finished with errors"))
    }
}

/// Run the check command
///
/// Read-only preview: no backup, no integrity record update, no remote
/// writes. Exits non-zero when changes are pending so CI can gate on drift.
pub async fn run_check(path: &Path, json: bool) -> Result<()> {
    let ctx = ProjectContext::load(path)?;
    let content = ContentSet::load(&ctx.content_path())?;

    if !json {
        println!("{} Checking declared content against the store...", "=>".blue().bold());
        for warning in content.governance_warnings() {
            println!("   {} {}", "!".yellow(), warning);
        }
    }

    let monitor = IntegrityMonitor::new(
        ctx.integrity_path(),
        ctx.config.tracked_paths(&ctx.root),
    );
    let integrity_changes = monitor.peek();

    let client = ctx.client()?;
    let state = StateStore::load(ctx.state_path());
    let mut engine = SyncEngine::new(&client, state, ctx.audit()).await?;
    let report = engine
        .sync(&content.records, &SyncOptions { dry_run: true })
        .await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "report": report,
                "integrity_changes": integrity_changes,
            }))?
        );
    } else {
        if !integrity_changes.is_empty() {
            println!(
                "   {} Tracked files changed since last run: {}",
                "!".yellow(),
                integrity_changes.join(", ")
            );
        }
        if report.is_noop() {
            println!(
                "{} No drift. {} record(s) unchanged.",
                "OK".green().bold(),
                report.skipped
            );
        } else {
            for action in &report.actions {
                println!("   {} {}", "+".green(), action);
            }
            println!(
                "{} {} change(s) pending. Run {} to apply.",
                "DRIFTED".red().bold(),
                report.pending(),
                "press sync".cyan()
            );
        }
    }

    if report.pending() > 0 {
        Err(CliError::user(format!("{} change(s) pending", report.pending())))
    } else {
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    if report.is_noop() {
        println!(
            "{} Already synchronized. {} record(s) unchanged.",
            "OK".green().bold(),
            report.skipped
        );
        return;
    }

    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for error in &report.errors {
        println!("   {} {}", "!".red(), error);
    }

    let summary = format!(
        "{} created, {} updated, {} skipped, {} failed",
        report.created, report.updated, report.skipped, report.failed
    );
    if report.success {
        println!("{} Synchronization complete: {}", "OK".green().bold(), summary);
    } else {
        println!(
            "{} Synchronization finished with errors: {}",
            "ERROR".red().bold(),
            summary
        );
    }
}
