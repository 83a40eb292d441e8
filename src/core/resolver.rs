//! Candidate-path resolution
//!
//! Enumerates the filesystem locations a backup of the target could live
//! at, in trial order. Pure: no I/O, no errors. The order returned here is
//! both the locator's probe order and the report's display order.

use std::path::Path;

use crate::constants::{BACKUP_SUFFIXES, MAX_PARENT_LEVELS};
use crate::core::types::{append_suffix, CandidatePath, CandidateTier};

/// Resolution policy: which suffixes to try beyond the built-ins, and how
/// far up the directory tree to look
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Extra suffixes appended after the built-ins, so they can never
    /// shadow `.bak`/`.backup`/`.old`
    pub extra_suffixes: Vec<String>,
    /// 0 = same-directory only (the default); capped at MAX_PARENT_LEVELS
    pub parent_levels: usize,
}

/// Enumerate candidate backup locations for `target`, in trial order:
/// same-directory candidates in suffix order, then each parent directory
/// in ascending distance.
pub fn resolve(target: &Path, options: &ResolveOptions) -> Vec<CandidatePath> {
    let suffixes: Vec<&str> = BACKUP_SUFFIXES
        .iter()
        .copied()
        .chain(options.extra_suffixes.iter().map(String::as_str))
        .collect();

    let mut candidates = Vec::new();

    for suffix in &suffixes {
        candidates.push(CandidatePath {
            path: append_suffix(target, suffix),
            tier: CandidateTier::SameDirectory,
        });
    }

    let levels = options.parent_levels.min(MAX_PARENT_LEVELS);
    if levels > 0 {
        if let Some(file_name) = target.file_name() {
            let mut dir = target.parent();
            for depth in 1..=levels {
                // One level up from the candidate's previous directory;
                // stop quietly at the filesystem root.
                dir = dir.and_then(Path::parent);
                let Some(parent) = dir else { break };
                // The filesystem root itself is out of bounds
                if parent.parent().is_none() {
                    break;
                }
                for suffix in &suffixes {
                    candidates.push(CandidatePath {
                        path: append_suffix(&parent.join(file_name), suffix),
                        tier: CandidateTier::ParentDirectory { depth },
                    });
                }
            }
        }
    }

    candidates
}
