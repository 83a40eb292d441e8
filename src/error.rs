use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnbakError {
    /// Unexpected I/O failure while inspecting a path (absence is not an error)
    #[error("Failed to inspect '{path}': {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preserved path already occupied: {path}")]
    PreservedPathConflict { path: PathBuf },

    #[error("Restore execution failed for '{target}': {reason}")]
    ExecutionFailure { target: PathBuf, reason: String },

    /// The backup was consumed but the original content could not be put back.
    /// Both paths are named so the caller can recover by hand.
    #[error("Partial restore failure: original content is at '{preserved}', target '{target}' needs manual recovery")]
    PartialFailure { target: PathBuf, preserved: PathBuf },

    #[error("A batch run is already in progress")]
    ConcurrentRunRejected,

    #[error("Queue cannot be cleared while a run is in progress")]
    BatchBusy,

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, UnbakError>;
