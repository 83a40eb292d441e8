// Integration tests for the guarded restore swap
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use unbak::core::resolver::ResolveOptions;
use unbak::core::types::{OutcomeCode, RestorePlan};
use unbak::core::{executor, locator, planner};

fn plan_for(target: &Path) -> RestorePlan {
    let report = locator::locate(target, &ResolveOptions::default()).unwrap();
    planner::plan(&report)
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn roundtrip_swaps_exactly_the_two_expected_entries() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "content A").unwrap();
    fs::write(dir.path().join("data.db.bak"), "content C").unwrap();

    let outcome = executor::execute(&plan_for(&target));
    assert!(outcome.success);
    assert_eq!(outcome.code, OutcomeCode::Restored);

    // Target now holds the backup content, preserved path holds the old
    // target content, and the backup entry is gone.
    assert_eq!(fs::read_to_string(&target).unwrap(), "content C");
    assert_eq!(
        fs::read_to_string(dir.path().join("data.db.new")).unwrap(),
        "content A"
    );
    assert_eq!(entries(dir.path()), vec!["data.db", "data.db.new"]);
}

#[test]
fn unrestorable_plan_mutates_nothing() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "content A").unwrap();

    let plan = plan_for(&target);
    assert!(!plan.can_restore);

    let outcome = executor::execute(&plan);
    assert!(!outcome.success);
    assert_eq!(outcome.code, OutcomeCode::NotRestorable);
    assert_eq!(entries(dir.path()), vec!["data.db"]);
    assert_eq!(fs::read_to_string(&target).unwrap(), "content A");
}

#[test]
fn existing_preserved_file_blocks_the_restore() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "content A").unwrap();
    fs::write(dir.path().join("data.db.bak"), "content C").unwrap();
    fs::write(dir.path().join("data.db.new"), "earlier restore").unwrap();

    let outcome = executor::execute(&plan_for(&target));
    assert!(!outcome.success);
    assert_eq!(outcome.code, OutcomeCode::PreservedPathConflict);

    // Nothing moved
    assert_eq!(fs::read_to_string(&target).unwrap(), "content A");
    assert_eq!(
        fs::read_to_string(dir.path().join("data.db.bak")).unwrap(),
        "content C"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("data.db.new")).unwrap(),
        "earlier restore"
    );
}

#[test]
fn failed_backup_install_reverses_the_preserve_step() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "content A").unwrap();
    fs::write(dir.path().join("data.db.bak"), "content C").unwrap();

    // The backup vanishes between planning and execution, so installing
    // it fails after the target was already moved aside. The executor
    // must put the original content back.
    let plan = plan_for(&target);
    fs::remove_file(dir.path().join("data.db.bak")).unwrap();

    let outcome = executor::execute(&plan);
    assert!(!outcome.success);
    assert_eq!(outcome.code, OutcomeCode::ExecutionFailure);
    assert!(!outcome.needs_manual_recovery());

    // Pre-operation state: target holds its old content, no .new left behind
    assert_eq!(fs::read_to_string(&target).unwrap(), "content A");
    assert_eq!(entries(dir.path()), vec!["data.db"]);
}

#[test]
fn outcome_carries_message_code_and_paths() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "content A").unwrap();
    fs::write(dir.path().join("data.db.bak"), "content C").unwrap();

    let outcome = executor::execute(&plan_for(&target));
    assert_eq!(outcome.target_file, target);
    assert_eq!(
        outcome.backup_file.as_deref(),
        Some(dir.path().join("data.db.bak").as_path())
    );
    assert_eq!(outcome.preserved_file, dir.path().join("data.db.new"));
    assert!(!outcome.message.is_empty());
    assert!(!outcome.needs_manual_recovery());
}

#[test]
fn repeated_restore_is_blocked_by_the_first_ones_preserved_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("data.db");
    fs::write(&target, "v2").unwrap();
    fs::write(dir.path().join("data.db.bak"), "v1").unwrap();

    assert!(executor::execute(&plan_for(&target)).success);

    // Second restore of the same target: a fresh backup appears, but the
    // .new from the first run must never be clobbered.
    fs::write(dir.path().join("data.db.bak"), "v0").unwrap();
    let second = executor::execute(&plan_for(&target));
    assert_eq!(second.code, OutcomeCode::PreservedPathConflict);
    assert_eq!(
        fs::read_to_string(dir.path().join("data.db.new")).unwrap(),
        "v2"
    );
}
