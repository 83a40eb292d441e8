use crate::config::Settings;
use crate::core::locator;
use crate::core::types::SearchReport;
use crate::error::Result;
use crate::ui as output;
use crate::utils::machine_output;
use colored::Colorize;
use std::path::PathBuf;

/// Options for the locate command
pub struct LocateOptions {
    pub file: PathBuf,
    pub parents: Option<usize>,
    pub format: Option<String>,
}

pub fn run(options: LocateOptions) -> Result<()> {
    let settings = Settings::load()?;
    let resolve = super::resolve_options(&settings, options.parents);

    let report = locator::locate(&options.file, &resolve)?;

    match options.format.as_deref() {
        Some(fmt @ ("json" | "yaml")) => {
            machine_output::emit_v1("locate", report.backup_found, &report, vec![], fmt)
        }
        _ => {
            display_report(&report);
            Ok(())
        }
    }
}

pub(crate) fn display_report(report: &SearchReport) {
    output::header("Backup search");
    output::keyval("Target", &report.target_file.path.display().to_string());
    if !report.target_file.exists {
        output::warning("Target file does not exist (restore will not be possible)");
    }

    output::separator();
    for check in &report.checked {
        let marker = if check.exists {
            "✓".green().bold().to_string()
        } else {
            "✗".bright_black().to_string()
        };
        output::indent(
            &format!(
                "{} {} ({})",
                marker,
                check.candidate.path.display(),
                check.candidate.tier
            ),
            1,
        );
    }
    output::separator();

    match &report.backup_file {
        Some(backup) => {
            output::success(&format!("Backup found: {}", backup.path.display()));
            output::keyval("Size", &format!("{} bytes", backup.size));
            output::keyval("Modified", &backup.modified_at.to_rfc3339());
        }
        None => {
            output::info(&format!(
                "No backup found ({} candidates checked)",
                report.checked.len()
            ));
        }
    }
}
