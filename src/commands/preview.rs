use crate::config::Settings;
use crate::core::types::RestorePlan;
use crate::core::{locator, planner};
use crate::error::Result;
use crate::ui as output;
use crate::utils::machine_output;
use std::path::PathBuf;

/// Options for the preview command
pub struct PreviewOptions {
    pub file: PathBuf,
    pub parents: Option<usize>,
    pub format: Option<String>,
}

pub fn run(options: PreviewOptions) -> Result<()> {
    let settings = Settings::load()?;
    let resolve = super::resolve_options(&settings, options.parents);

    let report = locator::locate(&options.file, &resolve)?;
    let plan = planner::plan(&report);

    match options.format.as_deref() {
        Some(fmt @ ("json" | "yaml")) => {
            machine_output::emit_v1("preview", plan.can_restore, &plan, vec![], fmt)
        }
        _ => {
            display_plan(&plan);
            Ok(())
        }
    }
}

pub(crate) fn display_plan(plan: &RestorePlan) {
    output::header("Restore preview");
    output::keyval("Target", &plan.target_file.path.display().to_string());
    if plan.target_file.exists {
        output::indent(
            &format!(
                "{} bytes, modified {}",
                plan.target_file.size,
                plan.target_file.modified_at.to_rfc3339()
            ),
            1,
        );
    } else {
        output::indent("does not exist", 1);
    }

    match &plan.backup_file {
        Some(backup) => {
            output::keyval("Backup", &backup.path.display().to_string());
            output::indent(
                &format!(
                    "{} bytes, modified {}",
                    backup.size,
                    backup.modified_at.to_rfc3339()
                ),
                1,
            );
        }
        None => output::keyval("Backup", "none found"),
    }

    output::keyval(
        "Preserved as",
        &plan.preserved_path.display().to_string(),
    );

    output::separator();
    if plan.can_restore {
        output::info("Restore is possible: the backup would replace the target, and the current content would be kept at the preserved path");
    } else if !plan.target_file.exists {
        output::warning("Cannot restore: target file does not exist");
    } else {
        output::warning("Cannot restore: no backup file found");
    }
}
