//! Restore execution
//!
//! The one place in the core that mutates the filesystem. The operation is
//! a two-step swap, as close to atomic as a pair of renames allows:
//!
//!   1. target  -> target.new   (preserve the current content)
//!   2. backup  -> target       (install the backup)
//!
//! Fails closed on a non-executable plan and on an occupied preserved
//! path. If step 2 fails after step 1 succeeded, exactly one reversal is
//! attempted; a failed reversal is the single state that must be surfaced
//! loudly instead of retried. At no point may the backup be consumed while
//! the original content is unreachable through both the target path and
//! the preserved path.

use chrono::Utc;
use std::fs;
use std::io;
use std::path::Path;

use crate::core::types::{OutcomeCode, RestoreOutcome, RestorePlan};

/// Execute a restore plan to a determinate outcome. Never returns `Err`:
/// every failure mode is encoded in the outcome so batch accounting and
/// rendering stay uniform.
pub fn execute(plan: &RestorePlan) -> RestoreOutcome {
    let target = &plan.target_file.path;
    let preserved = &plan.preserved_path;
    let backup_path = plan.backup_file.as_ref().map(|b| b.path.clone());

    if !plan.can_restore {
        return outcome(
            plan,
            OutcomeCode::NotRestorable,
            "Nothing to restore: target or backup is missing".to_string(),
        );
    }

    // can_restore guarantees a backup descriptor
    let Some(backup) = backup_path else {
        return outcome(
            plan,
            OutcomeCode::NotRestorable,
            "Nothing to restore: plan carries no backup file".to_string(),
        );
    };

    // Step 1: relocate the current content. An occupied preserved path is
    // a hard stop: a prior restore's `.new` is never clobbered.
    if preserved.exists() {
        return outcome(
            plan,
            OutcomeCode::PreservedPathConflict,
            format!(
                "Preserved path '{}' already exists; remove or rename it first",
                preserved.display()
            ),
        );
    }
    if let Err(e) = fs::rename(target, preserved) {
        return outcome(
            plan,
            OutcomeCode::ExecutionFailure,
            format!(
                "Could not preserve '{}' as '{}': {}",
                target.display(),
                preserved.display(),
                e
            ),
        );
    }

    // Step 2: install the backup at the target path.
    match move_file(&backup, target) {
        Ok(()) => outcome(
            plan,
            OutcomeCode::Restored,
            format!(
                "Restored '{}' from '{}'; previous content preserved at '{}'",
                target.display(),
                backup.display(),
                preserved.display()
            ),
        ),
        Err(e) => reverse_after_failure(plan, &backup, e),
    }
}

/// Step 2 failed with the original content sitting at the preserved path.
/// One reversal attempt puts it back; if that also fails, both paths are
/// named so the caller can escalate.
fn reverse_after_failure(plan: &RestorePlan, backup: &Path, cause: io::Error) -> RestoreOutcome {
    let target = &plan.target_file.path;
    let preserved = &plan.preserved_path;

    match fs::rename(preserved, target) {
        Ok(()) => outcome(
            plan,
            OutcomeCode::ExecutionFailure,
            format!(
                "Could not install backup '{}': {}; original content was put back at '{}'",
                backup.display(),
                cause,
                target.display()
            ),
        ),
        Err(reversal) => outcome(
            plan,
            OutcomeCode::PartialFailureRequiresManualRecovery,
            format!(
                "Backup install failed ({}) and reversal failed ({}): original content is at '{}', target '{}' is unoccupied; recover manually",
                cause,
                reversal,
                preserved.display(),
                target.display()
            ),
        ),
    }
}

/// Rename, falling back to copy-then-remove when the backup lives on a
/// different filesystem
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}

fn outcome(plan: &RestorePlan, code: OutcomeCode, message: String) -> RestoreOutcome {
    RestoreOutcome {
        success: code == OutcomeCode::Restored,
        code,
        target_file: plan.target_file.path.clone(),
        backup_file: plan.backup_file.as_ref().map(|b| b.path.clone()),
        preserved_file: plan.preserved_path.clone(),
        message,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locator;
    use crate::core::planner;
    use crate::core::resolver::ResolveOptions;
    use std::fs;
    use std::path::PathBuf;

    fn plan_for(target: &Path) -> RestorePlan {
        let report = locator::locate(target, &ResolveOptions::default()).unwrap();
        planner::plan(&report)
    }

    #[test]
    fn successful_swap_moves_exactly_two_entries() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("f.txt");
        let backup = dir.path().join("f.txt.bak");
        fs::write(&target, "current").unwrap();
        fs::write(&backup, "previous-good").unwrap();

        let out = execute(&plan_for(&target));
        assert!(out.success);
        assert_eq!(out.code, OutcomeCode::Restored);

        assert_eq!(fs::read_to_string(&target).unwrap(), "previous-good");
        assert_eq!(
            fs::read_to_string(dir.path().join("f.txt.new")).unwrap(),
            "current"
        );
        assert!(!backup.exists());
    }

    #[test]
    fn non_executable_plan_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("f.txt");
        fs::write(&target, "current").unwrap();

        let out = execute(&plan_for(&target));
        assert!(!out.success);
        assert_eq!(out.code, OutcomeCode::NotRestorable);
        assert_eq!(fs::read_to_string(&target).unwrap(), "current");
        assert!(!dir.path().join("f.txt.new").exists());
    }

    #[test]
    fn occupied_preserved_path_is_a_hard_stop() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("f.txt");
        let backup = dir.path().join("f.txt.bak");
        let preserved = dir.path().join("f.txt.new");
        fs::write(&target, "current").unwrap();
        fs::write(&backup, "previous-good").unwrap();
        fs::write(&preserved, "from-an-earlier-restore").unwrap();

        let out = execute(&plan_for(&target));
        assert!(!out.success);
        assert_eq!(out.code, OutcomeCode::PreservedPathConflict);

        // Every file untouched
        assert_eq!(fs::read_to_string(&target).unwrap(), "current");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "previous-good");
        assert_eq!(
            fs::read_to_string(&preserved).unwrap(),
            "from-an-earlier-restore"
        );
    }

    #[test]
    fn outcome_flags_manual_recovery_distinctly() {
        let out = RestoreOutcome {
            success: false,
            code: OutcomeCode::PartialFailureRequiresManualRecovery,
            target_file: PathBuf::from("/d/f"),
            backup_file: None,
            preserved_file: PathBuf::from("/d/f.new"),
            message: String::new(),
            timestamp: Utc::now(),
        };
        assert!(out.needs_manual_recovery());
    }
}
