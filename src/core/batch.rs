//! Batch restore coordination
//!
//! An owned FIFO queue processed one item at a time. Restores mutate the
//! filesystem, so items never run in parallel and never race a concurrent
//! discovery on the same path. A single busy flag makes `run` single-flight:
//! a second overlapping call is rejected, a re-run over a settled queue is
//! a no-op.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::core::executor;
use crate::core::locator;
use crate::core::planner;
use crate::core::resolver::ResolveOptions;
use crate::core::types::{BatchItem, BatchProgress, BatchStatus};
use crate::error::{Result, UnbakError};
use crate::ui;

pub struct BatchCoordinator {
    items: Mutex<Vec<BatchItem>>,
    running: AtomicBool,
    options: ResolveOptions,
}

impl BatchCoordinator {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
            options,
        }
    }

    /// Append a target path to the queue. Duplicate paths collapse to the
    /// item already queued.
    pub fn enqueue(&self, path: PathBuf) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        if items.iter().any(|i| i.source_file == path) {
            return;
        }
        items.push(BatchItem {
            source_file: path,
            status: BatchStatus::Queued,
            outcome: None,
        });
    }

    /// Remove a pending item before its turn is reached. Items that have
    /// started (or settled) stay in the queue.
    pub fn cancel(&self, path: &Path) -> bool {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let before = items.len();
        items.retain(|i| !(i.source_file == path && i.status == BatchStatus::Queued));
        items.len() != before
    }

    /// Snapshot of the queue
    pub fn items(&self) -> Vec<BatchItem> {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Discard all items regardless of status. Refused while a run is in
    /// progress.
    pub fn clear(&self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Err(UnbakError::BatchBusy);
        }
        self.items.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }

    /// Process queued items strictly in FIFO order, one at a time:
    /// locate -> plan -> execute per item, emitting a progress event after
    /// each. One item's failure never aborts the rest of the queue. A
    /// Ctrl-C mark stops the run between items; the item being executed
    /// always settles first.
    pub fn run<F>(&self, mut on_progress: F) -> Result<Vec<BatchItem>>
    where
        F: FnMut(&BatchProgress),
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(UnbakError::ConcurrentRunRejected);
        }

        let result = self.run_locked(&mut on_progress);
        self.running.store(false, Ordering::SeqCst);
        result
    }

    fn run_locked<F>(&self, on_progress: &mut F) -> Result<Vec<BatchItem>>
    where
        F: FnMut(&BatchProgress),
    {
        let total = {
            let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
            items.len()
        };

        for index in 0..total {
            if ui::is_interrupted() {
                break;
            }

            // Take the item's path while marking it in-flight; the lock is
            // dropped before any filesystem work so observers can snapshot
            // the queue mid-run.
            let path = {
                let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
                let Some(item) = items.get_mut(index) else { break };
                if item.status != BatchStatus::Queued {
                    continue; // already settled on a previous run
                }
                item.status = BatchStatus::Restoring;
                item.source_file.clone()
            };

            let outcome = match locator::locate(&path, &self.options) {
                Ok(report) => executor::execute(&planner::plan(&report)),
                Err(e) => {
                    // Probe failure settles the item as Failed with a
                    // synthetic outcome; the queue moves on.
                    probe_failure_outcome(&path, &e)
                }
            };

            let progress = {
                let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
                let Some(item) = items.get_mut(index) else { break };
                item.status = if outcome.success {
                    BatchStatus::Restored
                } else {
                    BatchStatus::Failed
                };
                item.outcome = Some(outcome);
                BatchProgress {
                    index,
                    total,
                    item: item.clone(),
                }
            };

            on_progress(&progress);
        }

        Ok(self.items())
    }
}

fn probe_failure_outcome(path: &Path, error: &UnbakError) -> crate::core::types::RestoreOutcome {
    crate::core::types::RestoreOutcome {
        success: false,
        code: crate::core::types::OutcomeCode::ProbeFailure,
        target_file: path.to_path_buf(),
        backup_file: None,
        preserved_file: crate::core::types::preserved_path_for(path),
        message: format!("Discovery failed: {}", error),
        timestamp: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::OutcomeCode;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn enqueue_dedups_by_path() {
        let coord = BatchCoordinator::new(ResolveOptions::default());
        coord.enqueue(PathBuf::from("/d/a"));
        coord.enqueue(PathBuf::from("/d/a"));
        coord.enqueue(PathBuf::from("/d/b"));
        assert_eq!(coord.items().len(), 2);
    }

    #[test]
    fn cancel_removes_only_queued_items() {
        let coord = BatchCoordinator::new(ResolveOptions::default());
        coord.enqueue(PathBuf::from("/d/a"));
        assert!(coord.cancel(Path::new("/d/a")));
        assert!(!coord.cancel(Path::new("/d/a")));
        assert!(coord.items().is_empty());
    }

    #[test]
    fn failed_item_does_not_abort_the_queue() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = dir.path().join("f1");
        let f2 = dir.path().join("f2");
        let f3 = dir.path().join("f3");
        for f in [&f1, &f2, &f3] {
            fs::write(f, "current").unwrap();
        }
        // f2 has no backup
        fs::write(dir.path().join("f1.bak"), "good1").unwrap();
        fs::write(dir.path().join("f3.bak"), "good3").unwrap();

        let coord = BatchCoordinator::new(ResolveOptions::default());
        for f in [&f1, &f2, &f3] {
            coord.enqueue(f.clone());
        }

        let mut seen = Vec::new();
        let items = coord
            .run(|p| seen.push((p.index, p.item.status)))
            .unwrap();

        let statuses: Vec<_> = items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![BatchStatus::Restored, BatchStatus::Failed, BatchStatus::Restored]
        );
        assert_eq!(
            items[1].outcome.as_ref().unwrap().code,
            OutcomeCode::NotRestorable
        );
        assert_eq!(seen.len(), 3);
        assert_eq!(fs::read_to_string(&f1).unwrap(), "good1");
        assert_eq!(fs::read_to_string(&f2).unwrap(), "current");
        assert_eq!(fs::read_to_string(&f3).unwrap(), "good3");
    }

    #[test]
    fn second_run_while_processing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = dir.path().join("f1");
        fs::write(&f1, "current").unwrap();
        fs::write(dir.path().join("f1.bak"), "good").unwrap();

        let coord = Arc::new(BatchCoordinator::new(ResolveOptions::default()));
        coord.enqueue(f1);

        // Re-enter run from inside the progress callback: the first run is
        // still in flight, so the nested call must be rejected.
        let inner = Arc::clone(&coord);
        let mut nested = None;
        coord
            .run(|_| {
                nested = Some(inner.run(|_| {}));
            })
            .unwrap();

        assert!(matches!(
            nested,
            Some(Err(UnbakError::ConcurrentRunRejected))
        ));
    }

    #[test]
    fn rerun_over_a_settled_queue_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = dir.path().join("f1");
        fs::write(&f1, "current").unwrap();
        fs::write(dir.path().join("f1.bak"), "good").unwrap();

        let coord = BatchCoordinator::new(ResolveOptions::default());
        coord.enqueue(f1.clone());
        coord.run(|_| {}).unwrap();
        assert_eq!(fs::read_to_string(&f1).unwrap(), "good");

        // Settled item is skipped; no second restore attempt, no events.
        let mut events = 0;
        let items = coord.run(|_| events += 1).unwrap();
        assert_eq!(events, 0);
        assert_eq!(items[0].status, BatchStatus::Restored);
        assert_eq!(fs::read_to_string(&f1).unwrap(), "good");
    }

    #[test]
    fn clear_refused_while_running() {
        let coord = Arc::new(BatchCoordinator::new(ResolveOptions::default()));
        let dir = tempfile::tempdir().unwrap();
        let f1 = dir.path().join("f1");
        fs::write(&f1, "current").unwrap();
        fs::write(dir.path().join("f1.bak"), "good").unwrap();
        coord.enqueue(f1);

        let inner = Arc::clone(&coord);
        let mut cleared = None;
        coord
            .run(|_| {
                cleared = Some(inner.clear());
            })
            .unwrap();
        assert!(matches!(cleared, Some(Err(UnbakError::BatchBusy))));

        // Once the run is over, clear succeeds.
        coord.clear().unwrap();
        assert!(coord.items().is_empty());
    }
}
