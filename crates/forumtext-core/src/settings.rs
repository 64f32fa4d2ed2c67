// SPDX-License-Identifier: AGPL-3.0-or-later
//! Site-wide configuration
//!
//! The default format is looked up through [`Settings`] on every call, so a
//! changed environment or a swapped settings object takes effect immediately.

use crate::format::Format;
use crate::traits::{MarkupError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the configured default format
pub const DEFAULT_FORMAT_ENV: &str = "FORUMTEXT_DEFAULT_FORMAT";

/// Source of the site-wide default format
pub trait Settings: Send + Sync {
    /// Name of the default format, if one is configured
    fn default_format(&self) -> Option<String>;
}

/// Configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Format used when a post carries no directive
    pub default_format: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            default_format: Format::Plain.name().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Sectioned { markup: MarkupConfig },
    Flat(MarkupConfig),
}

impl MarkupConfig {
    pub fn new(default_format: Format) -> Self {
        Self {
            default_format: default_format.name().to_string(),
        }
    }

    /// Parse TOML, either flat or under a `[markup]` table
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(match file {
            ConfigFile::Sectioned { markup } => markup,
            ConfigFile::Flat(config) => config,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| MarkupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            default_format = %config.default_format,
            "loaded configuration"
        );
        Ok(config)
    }
}

impl Settings for MarkupConfig {
    fn default_format(&self) -> Option<String> {
        Some(self.default_format.clone())
    }
}

/// Settings read from the environment on each lookup
///
/// Falls back to the wrapped configuration when the variable is unset.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    fallback: MarkupConfig,
}

impl EnvSettings {
    pub fn new(fallback: MarkupConfig) -> Self {
        Self { fallback }
    }
}

impl Settings for EnvSettings {
    fn default_format(&self) -> Option<String> {
        match std::env::var(DEFAULT_FORMAT_ENV) {
            Ok(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
            _ => self.fallback.default_format(),
        }
    }
}

/// Look up the configured default as a known format
///
/// An unknown name counts as "not configured".
pub fn configured_format(settings: &dyn Settings) -> Option<Format> {
    let name = settings.default_format()?;
    match name.parse() {
        Ok(format) => Some(format),
        Err(_) => {
            tracing::debug!(%name, "ignoring unknown default format");
            None
        }
    }
}
