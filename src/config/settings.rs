//! Settings Module
//!
//! Optional `settings.kdl` in the user config directory:
//!
//! ```kdl
//! // Extra candidate suffixes, tried after the built-ins
//! suffixes ".save" ".stash"
//! // Default parent-directory search depth (0 = same directory only)
//! parents 0
//! // Color mode: auto | always | never
//! color "auto"
//! ```

use crate::constants::MAX_PARENT_LEVELS;
use crate::error::{Result, UnbakError};
use crate::utils::paths;
use kdl::KdlDocument;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Candidate suffixes tried after the built-ins, in declaration order
    pub extra_suffixes: Vec<String>,
    /// Default parent-directory search depth when `--parents` is not given
    pub parents: usize,
    /// Color mode: auto, always, never
    pub color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extra_suffixes: Vec::new(),
            parents: 0,
            color: "auto".to_string(),
        }
    }
}

impl Settings {
    /// Load from the user settings file, or defaults when it does not exist
    pub fn load() -> Result<Self> {
        let settings_file = paths::settings_file()?;
        if !settings_file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&settings_file)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let doc: KdlDocument = content.parse()?;
        let mut settings = Self::default();

        for node in doc.nodes() {
            match node.name().value() {
                "suffixes" => {
                    for entry in node.entries() {
                        let Some(suffix) = entry.value().as_string() else {
                            return Err(UnbakError::SettingsError(
                                "suffixes entries must be strings".to_string(),
                            ));
                        };
                        if !suffix.starts_with('.') || suffix.len() < 2 {
                            return Err(UnbakError::SettingsError(format!(
                                "Invalid suffix '{}': must start with '.'",
                                suffix
                            )));
                        }
                        settings.extra_suffixes.push(suffix.to_string());
                    }
                }
                "parents" => {
                    let value = node
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_integer())
                        .ok_or_else(|| {
                            UnbakError::SettingsError("parents must be an integer".to_string())
                        })?;
                    if value < 0 || value > MAX_PARENT_LEVELS as i128 {
                        return Err(UnbakError::SettingsError(format!(
                            "parents must be between 0 and {}",
                            MAX_PARENT_LEVELS
                        )));
                    }
                    settings.parents = value as usize;
                }
                "color" => {
                    let value = node
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .ok_or_else(|| {
                            UnbakError::SettingsError("color must be a string".to_string())
                        })?;
                    match value {
                        "auto" | "always" | "never" => settings.color = value.to_string(),
                        other => {
                            return Err(UnbakError::SettingsError(format!(
                                "Unknown color mode '{}' (expected auto, always, never)",
                                other
                            )));
                        }
                    }
                }
                other => {
                    return Err(UnbakError::SettingsError(format!(
                        "Unknown setting: '{}'",
                        other
                    )));
                }
            }
        }

        Ok(settings)
    }
}
