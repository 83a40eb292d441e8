use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::PRESERVED_SUFFIX;

/// Snapshot of a path's filesystem state. Produced fresh by the probe on
/// every query and never cached: the filesystem can change between checks.
#[derive(Debug, Clone, Serialize)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub exists: bool,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

impl FileDescriptor {
    /// Descriptor for a path that does not exist
    pub fn absent(path: PathBuf) -> Self {
        Self {
            path,
            exists: false,
            size: 0,
            modified_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Where a candidate backup location sits relative to the target.
/// Earlier tiers are tried first; the resolver owns the ordering.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateTier {
    SameDirectory,
    /// Ancestor directory, 1 = immediate parent
    ParentDirectory { depth: usize },
}

impl fmt::Display for CandidateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameDirectory => write!(f, "same directory"),
            Self::ParentDirectory { depth } => write!(f, "parent directory {}", depth),
        }
    }
}

/// A location the resolver considers plausible for a backup,
/// before existence has been checked
#[derive(Debug, Clone, Serialize)]
pub struct CandidatePath {
    pub path: PathBuf,
    pub tier: CandidateTier,
}

/// One probed candidate as recorded in the search report
#[derive(Debug, Clone, Serialize)]
pub struct CandidateCheck {
    pub candidate: CandidatePath,
    pub exists: bool,
}

/// Full record of a discovery request: what was checked, in what order,
/// and what was found. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub target_file: FileDescriptor,
    /// Every candidate probed, in trial order, up to and including the match
    pub checked: Vec<CandidateCheck>,
    pub backup_found: bool,
    pub backup_file: Option<FileDescriptor>,
}

/// What a restore would do, computed without touching the filesystem
#[derive(Debug, Clone, Serialize)]
pub struct RestorePlan {
    pub target_file: FileDescriptor,
    pub backup_file: Option<FileDescriptor>,
    pub preserved_path: PathBuf,
    pub can_restore: bool,
}

/// Structured reason code carried by every outcome, alongside the
/// human-readable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCode {
    Restored,
    /// The plan was not executable (missing target or backup)
    NotRestorable,
    /// A prior `.new` already occupies the preserved path
    PreservedPathConflict,
    /// The swap failed but the system was left in its pre-operation state
    ExecutionFailure,
    /// Discovery could not even stat the paths involved
    ProbeFailure,
    /// The reversal also failed; both paths need manual attention
    PartialFailureRequiresManualRecovery,
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Restored => "restored",
            Self::NotRestorable => "not_restorable",
            Self::PreservedPathConflict => "preserved_path_conflict",
            Self::ExecutionFailure => "execution_failure",
            Self::ProbeFailure => "probe_failure",
            Self::PartialFailureRequiresManualRecovery => {
                "partial_failure_requires_manual_recovery"
            }
        };
        write!(f, "{}", s)
    }
}

/// Result of one executed plan. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    pub success: bool,
    pub code: OutcomeCode,
    pub target_file: PathBuf,
    pub backup_file: Option<PathBuf>,
    pub preserved_file: PathBuf,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl RestoreOutcome {
    /// True only for the one state that must be escalated rather than
    /// treated as a routine failure
    pub fn needs_manual_recovery(&self) -> bool {
        self.code == OutcomeCode::PartialFailureRequiresManualRecovery
    }
}

/// Batch queue item lifecycle: Queued -> Restoring -> Restored | Failed,
/// strictly in queue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Queued,
    Restoring,
    Restored,
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Restoring => write!(f, "restoring"),
            Self::Restored => write!(f, "restored"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub source_file: PathBuf,
    pub status: BatchStatus,
    pub outcome: Option<RestoreOutcome>,
}

/// Progress event emitted after each batch item settles
#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    pub index: usize,
    pub total: usize,
    pub item: BatchItem,
}

/// The preserved-file path for a target: the target path with `.new`
/// appended literally (not an extension replacement)
pub fn preserved_path_for(target: &Path) -> PathBuf {
    append_suffix(target, PRESERVED_SUFFIX)
}

/// Append a suffix to a full path, keeping the original file name intact
/// ("app.conf" + ".bak" = "app.conf.bak")
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
