pub mod completions;
pub mod locate;
pub mod preview;
pub mod restore;

use crate::config::Settings;
use crate::core::resolver::ResolveOptions;

/// Resolution policy for a command: settings defaults, overridden by the
/// command-line flag
pub(crate) fn resolve_options(settings: &Settings, parents_flag: Option<usize>) -> ResolveOptions {
    ResolveOptions {
        extra_suffixes: settings.extra_suffixes.clone(),
        parent_levels: parents_flag.unwrap_or(settings.parents),
    }
}
