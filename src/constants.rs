// Common constants used throughout the codebase

/// Project name
pub const PROJECT_NAME: &str = "unbak";

/// Project organization (reverse domain notation)
pub const PROJECT_QUALIFIER: &str = "io";
pub const PROJECT_ORG: &str = "unbak";

/// Built-in backup suffixes, in trial order. Order is a correctness
/// property: the locator stops at the first existing candidate.
pub const BACKUP_SUFFIXES: &[&str] = &[".bak", ".backup", ".old", ".orig"];

/// Suffix appended to the target path to preserve its pre-restore content
pub const PRESERVED_SUFFIX: &str = ".new";

/// Upper bound on parent-directory search depth
pub const MAX_PARENT_LEVELS: usize = 5;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.kdl";
