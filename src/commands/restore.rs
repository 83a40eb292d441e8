use crate::config::Settings;
use crate::core::batch::BatchCoordinator;
use crate::core::resolver::ResolveOptions;
use crate::core::types::{BatchItem, BatchStatus, OutcomeCode, RestoreOutcome};
use crate::core::{executor, locator, planner};
use crate::error::{Result, UnbakError};
use crate::ui as output;
use crate::ui::progress::ProgressBar;
use crate::utils::machine_output;
use std::path::PathBuf;

/// Options for the restore command
pub struct RestoreOptions {
    pub files: Vec<PathBuf>,
    pub parents: Option<usize>,
    pub yes: bool,
    pub format: Option<String>,
}

pub fn run(options: RestoreOptions) -> Result<()> {
    let settings = Settings::load()?;
    let resolve = super::resolve_options(&settings, options.parents);

    if options.files.len() == 1 {
        restore_single(&options, &resolve)
    } else {
        restore_batch(&options, &resolve)
    }
}

fn restore_single(
    options: &RestoreOptions,
    resolve: &ResolveOptions,
) -> Result<()> {
    let file = &options.files[0];
    let report = locator::locate(file, resolve)?;
    let plan = planner::plan(&report);

    let machine = matches!(options.format.as_deref(), Some("json" | "yaml"));

    if !plan.can_restore {
        if machine {
            let fmt = options.format.as_deref().unwrap_or("json");
            machine_output::emit_v1("restore", false, &plan, vec![], fmt)?;
        } else {
            super::preview::display_plan(&plan);
        }
        return Err(UnbakError::Other(format!(
            "Nothing to restore for '{}'",
            file.display()
        )));
    }

    if !machine {
        super::preview::display_plan(&plan);
        output::separator();
    }

    if !options.yes && !machine {
        let backup = plan
            .backup_file
            .as_ref()
            .map(|b| b.path.display().to_string())
            .unwrap_or_default();
        if !output::prompt_yes_no(&format!(
            "Restore '{}' from '{}'?",
            file.display(),
            backup
        )) {
            output::info("Restore cancelled");
            return Ok(());
        }
    }

    let outcome = executor::execute(&plan);

    if machine {
        let fmt = options.format.as_deref().unwrap_or("json");
        machine_output::emit_v1("restore", outcome.success, &outcome, vec![], fmt)?;
    } else {
        display_outcome(&outcome);
    }

    outcome_to_result(&outcome)
}

fn restore_batch(
    options: &RestoreOptions,
    resolve: &ResolveOptions,
) -> Result<()> {
    let coordinator = BatchCoordinator::new(resolve.clone());
    for file in &options.files {
        coordinator.enqueue(file.clone());
    }

    let queued = coordinator.items().len();
    let machine = matches!(options.format.as_deref(), Some("json" | "yaml"));

    if !options.yes && !machine {
        if !output::prompt_yes_no(&format!("Restore {} files from their backups?", queued)) {
            output::info("Batch cancelled");
            return Ok(());
        }
    }

    let show_bar = !machine && !output::is_quiet() && !output::is_verbose();
    let mut bar = show_bar.then(|| ProgressBar::new(queued, "Restoring"));

    let items = coordinator.run(|progress| {
        if let Some(bar) = bar.as_mut() {
            bar.inc();
        } else if !machine {
            if let Some(outcome) = &progress.item.outcome {
                output::verbose(&format!(
                    "[{}/{}] {}",
                    progress.index + 1,
                    progress.total,
                    outcome.message
                ));
            }
        }
    })?;
    if let Some(bar) = bar.take() {
        bar.finish();
    }

    if machine {
        let fmt = options.format.as_deref().unwrap_or("json");
        let ok = items.iter().all(|i| {
            i.outcome.as_ref().map(|o| o.success).unwrap_or(false)
        });
        machine_output::emit_v1("restore", ok, &items, vec![], fmt)?;
    } else {
        output::separator();
        for item in &items {
            match &item.outcome {
                Some(outcome) if outcome.success => {
                    output::success(&format!("{}: restored", item.source_file.display()));
                }
                Some(outcome) => {
                    output::error(&format!(
                        "{}: {} ({})",
                        item.source_file.display(),
                        outcome.code,
                        outcome.message
                    ));
                }
                None => {
                    output::warning(&format!(
                        "{}: not processed (interrupted)",
                        item.source_file.display()
                    ));
                }
            }
        }
    }

    summarize(&items)
}

fn summarize(items: &[BatchItem]) -> Result<()> {
    let restored = items
        .iter()
        .filter(|i| i.status == BatchStatus::Restored)
        .count();
    let failed = items
        .iter()
        .filter(|i| i.status == BatchStatus::Failed)
        .count();

    output::info(&format!("{} restored, {} failed", restored, failed));

    // A partial failure anywhere in the batch is escalated above the
    // per-item noise
    for item in items {
        if let Some(outcome) = &item.outcome {
            if outcome.needs_manual_recovery() {
                output::alert(&outcome.message);
                return Err(UnbakError::PartialFailure {
                    target: outcome.target_file.clone(),
                    preserved: outcome.preserved_file.clone(),
                });
            }
        }
    }

    if failed > 0 {
        return Err(UnbakError::Other(format!(
            "{} of {} restores failed",
            failed,
            items.len()
        )));
    }
    Ok(())
}

fn display_outcome(outcome: &RestoreOutcome) {
    if outcome.success {
        output::success(&outcome.message);
    } else if outcome.needs_manual_recovery() {
        output::alert(&outcome.message);
    } else {
        output::error(&outcome.message);
    }
}

fn outcome_to_result(outcome: &RestoreOutcome) -> Result<()> {
    match outcome.code {
        OutcomeCode::Restored => Ok(()),
        OutcomeCode::NotRestorable => Err(UnbakError::Other(outcome.message.clone())),
        OutcomeCode::PreservedPathConflict => Err(UnbakError::PreservedPathConflict {
            path: outcome.preserved_file.clone(),
        }),
        OutcomeCode::ExecutionFailure | OutcomeCode::ProbeFailure => {
            Err(UnbakError::ExecutionFailure {
                target: outcome.target_file.clone(),
                reason: outcome.message.clone(),
            })
        }
        OutcomeCode::PartialFailureRequiresManualRecovery => Err(UnbakError::PartialFailure {
            target: outcome.target_file.clone(),
            preserved: outcome.preserved_file.clone(),
        }),
    }
}
