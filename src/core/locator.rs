//! Backup discovery
//!
//! Probes candidates in resolver order and stops at the first one that
//! exists. First-match-wins is the tie-break: not "newest", not "closest
//! in mtime". The report records every candidate probed, including the
//! match, so the caller can show exactly what was checked.

use std::path::Path;

use crate::core::probe::{FsProbe, Probe};
use crate::core::resolver::{self, ResolveOptions};
use crate::core::types::{CandidateCheck, SearchReport};
use crate::error::Result;

/// Discover the first existing backup for `target` using the real
/// filesystem probe
pub fn locate(target: &Path, options: &ResolveOptions) -> Result<SearchReport> {
    locate_with(&FsProbe, target, options)
}

/// Discovery with an injected probe. Discovery proceeds whether or not
/// the target itself exists; a missing target only matters at plan time.
pub fn locate_with<P: Probe>(
    probe: &P,
    target: &Path,
    options: &ResolveOptions,
) -> Result<SearchReport> {
    let target_file = probe.probe(target)?;
    let candidates = resolver::resolve(target, options);

    let mut checked = Vec::new();
    let mut backup_file = None;

    for candidate in candidates {
        let desc = probe.probe(&candidate.path)?;
        let exists = desc.exists;
        checked.push(CandidateCheck { candidate, exists });
        if exists {
            backup_file = Some(desc);
            break;
        }
    }

    Ok(SearchReport {
        target_file,
        checked,
        backup_found: backup_file.is_some(),
        backup_file,
    })
}
