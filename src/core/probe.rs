//! Filesystem introspection
//!
//! One stat per query, fresh every time. A missing file is an expected
//! outcome, not an error; only genuinely unexpected failures (permission
//! denied on the containing directory, broken mounts) surface as errors.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;

use crate::core::types::FileDescriptor;
use crate::error::{Result, UnbakError};

/// Seam for filesystem introspection so tests can substitute a double
pub trait Probe {
    /// Existence, size, and mtime as one logical unit
    fn probe(&self, path: &Path) -> Result<FileDescriptor>;
}

/// The real probe, backed by `std::fs::metadata`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl Probe for FsProbe {
    fn probe(&self, path: &Path) -> Result<FileDescriptor> {
        match fs::metadata(path) {
            Ok(meta) => {
                let modified_at = meta
                    .modified()
                    .map(DateTime::<Utc>::from)
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                Ok(FileDescriptor {
                    path: path.to_path_buf(),
                    exists: true,
                    size: meta.len(),
                    modified_at,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(FileDescriptor::absent(path.to_path_buf()))
            }
            Err(source) => Err(UnbakError::Probe {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
