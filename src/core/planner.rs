//! Restore planning
//!
//! Pure computation over a search report: no I/O beyond what the report
//! already carries. Occupancy of the preserved path is deliberately not
//! checked here; it can change between planning and execution, and
//! planning must stay side-effect-free. The executor owns that check.

use crate::core::types::{preserved_path_for, RestorePlan, SearchReport};

/// Compute what a restore would do for this report
pub fn plan(report: &SearchReport) -> RestorePlan {
    let backup_exists = report
        .backup_file
        .as_ref()
        .map(|b| b.exists)
        .unwrap_or(false);

    let can_restore = report.backup_found && report.target_file.exists && backup_exists;

    RestorePlan {
        target_file: report.target_file.clone(),
        backup_file: report.backup_file.clone(),
        preserved_path: preserved_path_for(&report.target_file.path),
        can_restore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FileDescriptor;
    use chrono::Utc;
    use std::path::PathBuf;

    fn present(path: &str) -> FileDescriptor {
        FileDescriptor {
            path: PathBuf::from(path),
            exists: true,
            size: 1,
            modified_at: Utc::now(),
        }
    }

    fn report(target: FileDescriptor, backup: Option<FileDescriptor>) -> SearchReport {
        SearchReport {
            target_file: target,
            checked: Vec::new(),
            backup_found: backup.is_some(),
            backup_file: backup,
        }
    }

    #[test]
    fn plan_without_backup_cannot_restore() {
        let p = plan(&report(present("/d/f"), None));
        assert!(!p.can_restore);
        assert_eq!(p.preserved_path, PathBuf::from("/d/f.new"));
    }

    #[test]
    fn plan_requires_target_to_exist() {
        let target = FileDescriptor::absent(PathBuf::from("/d/f"));
        let p = plan(&report(target, Some(present("/d/f.bak"))));
        assert!(!p.can_restore);
    }

    #[test]
    fn plan_with_both_present_can_restore() {
        let p = plan(&report(present("/d/f"), Some(present("/d/f.bak"))));
        assert!(p.can_restore);
        assert_eq!(p.backup_file.unwrap().path, PathBuf::from("/d/f.bak"));
    }
}
