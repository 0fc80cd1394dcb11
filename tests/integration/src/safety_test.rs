//! Safety-net behavior: backups, integrity monitoring, rollback.

use press_core::{AuditLog, BackupManager, IntegrityMonitor};
use tempfile::TempDir;

use pretty_assertions::assert_eq;

const CONTENT_V1: &str = "[[records]]\ntitle = \"Market Scan\"\nbody = \"<p>v1</p>\"\n";
const CONTENT_V2: &str = "[[records]]\ntitle = \"Market Scan\"\nbody = \"<p>v2</p>\"\n";
const CONFIG: &str = "[site]\nbase_url = \"https://example.com\"\nusername = \"editor\"\n";

#[test]
fn every_run_snapshots_before_touching_anything() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content.toml");
    let config = dir.path().join("press.toml");
    std::fs::write(&content, CONTENT_V1).unwrap();
    std::fs::write(&config, CONFIG).unwrap();

    let manager = BackupManager::new(dir.path().join(".press/backups"));

    let first = manager.snapshot(&[content.clone(), config.clone()]).unwrap();
    assert_eq!(first.metadata.files, vec!["content.toml", "press.toml"]);

    std::fs::write(&content, CONTENT_V2).unwrap();
    let second = manager.snapshot(&[content, config]).unwrap();

    // Both generations remain on disk, untouched.
    assert_eq!(
        std::fs::read_to_string(first.path.join("content.toml")).unwrap(),
        CONTENT_V1
    );
    assert_eq!(
        std::fs::read_to_string(second.path.join("content.toml")).unwrap(),
        CONTENT_V2
    );
}

#[test]
fn integrity_difference_lands_in_the_audit_trail() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join(".press");
    let content = dir.path().join("content.toml");
    std::fs::write(&content, CONTENT_V1).unwrap();

    let monitor = IntegrityMonitor::new(work.join("integrity.json"), vec![content.clone()]);
    let audit = AuditLog::new(&work);
    std::fs::create_dir_all(&work).unwrap();

    // First run records the baseline.
    let changed = monitor.check().unwrap();
    assert_eq!(changed, vec!["content.toml"]);
    audit.code_update(&changed);

    // Unchanged second run stays quiet.
    assert!(monitor.check().unwrap().is_empty());

    // An edit is detected and audited distinctly from content changes.
    std::fs::write(&content, CONTENT_V2).unwrap();
    let changed = monitor.check().unwrap();
    assert_eq!(changed, vec!["content.toml"]);
    audit.code_update(&changed);

    let changelog = std::fs::read_to_string(work.join("changelog.txt")).unwrap();
    let code_updates = changelog
        .lines()
        .filter(|l| l.contains("[CODE UPDATE"))
        .count();
    assert_eq!(code_updates, 2);
    assert!(changelog.contains("(ID: SYSTEM)"));
}

#[test]
fn rollback_restores_the_selected_snapshot_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content.toml");
    // Non-ASCII content so an encoding slip would be caught.
    let original = "[[records]]\ntitle = \"Caf\u{e9} \u{201C}Notes\u{201D}\"\nbody = \"<p>\u{2019}</p>\"\n";
    std::fs::write(&content, original).unwrap();

    let manager = BackupManager::new(dir.path().join(".press/backups"));
    manager.snapshot(std::slice::from_ref(&content)).unwrap();

    // A later bad run mangles the live file.
    std::fs::write(&content, "mangled").unwrap();

    let snapshot = manager.latest_with("content.toml").unwrap().unwrap();
    manager.restore(&snapshot, "content.toml", &content).unwrap();

    assert_eq!(std::fs::read(&content).unwrap(), original.as_bytes());
}

#[test]
fn rollback_with_no_snapshot_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content.toml");
    std::fs::write(&content, CONTENT_V1).unwrap();

    let manager = BackupManager::new(dir.path().join(".press/backups"));
    assert!(manager.latest_with("content.toml").unwrap().is_none());
    assert_eq!(std::fs::read_to_string(&content).unwrap(), CONTENT_V1);
}
