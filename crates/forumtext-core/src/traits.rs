// SPDX-License-Identifier: AGPL-3.0-or-later
//! Formatter trait and the registry of available formatters

use crate::format::Format;
use crate::formats::PlainFormatter;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Error type for configuration and backend failures
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("{format} backend failed: {message}")]
    Backend { format: Format, message: String },

    #[error("Failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MarkupError>;

/// A text to HTML converter for one format
pub trait Formatter: Send + Sync {
    /// The format this formatter handles
    fn format(&self) -> Format;

    /// Render source text as an HTML fragment
    fn to_html(&self, text: &str) -> Result<String>;
}

/// Registry of formatters, keyed by format
///
/// The plain formatter has no external dependency and is always present,
/// so [`FormatterRegistry::resolve`] always lands on a usable entry.
pub struct FormatterRegistry {
    formatters: HashMap<Format, Box<dyn Formatter>>,
    fallback: PlainFormatter,
}

impl FormatterRegistry {
    /// Registry containing only the plain formatter
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
            fallback: PlainFormatter::new(),
        }
    }

    /// Registry with every backend compiled into this build
    pub fn with_available_backends() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new();

        #[cfg(feature = "markdown")]
        registry.register(Box::new(crate::formats::MarkdownFormatter::new()));

        #[cfg(feature = "rst")]
        registry.register(Box::new(crate::formats::RstFormatter::new()));

        registry
    }

    /// Process-wide registry, built on first use and immutable afterwards
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<FormatterRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let registry = Self::with_available_backends();
            tracing::debug!(formats = ?registry.available(), "formatter registry initialised");
            registry
        })
    }

    /// Add a formatter, replacing any existing one for the same format
    pub fn register(&mut self, formatter: Box<dyn Formatter>) {
        let format = formatter.format();
        tracing::trace!(%format, "registering formatter");
        self.formatters.insert(format, formatter);
    }

    /// Formatter for `format`; plain is answered by the built-in fallback
    /// unless a replacement was registered
    pub fn get(&self, format: Format) -> Option<&dyn Formatter> {
        match self.formatters.get(&format) {
            Some(formatter) => Some(formatter.as_ref()),
            None if format == Format::Plain => Some(&self.fallback),
            None => None,
        }
    }

    pub fn contains(&self, format: Format) -> bool {
        format == Format::Plain || self.formatters.contains_key(&format)
    }

    /// Formats with a registered formatter, sorted
    pub fn available(&self) -> Vec<Format> {
        let mut formats: Vec<_> = self.formatters.keys().copied().collect();
        formats.push(Format::Plain);
        formats.sort();
        formats.dedup();
        formats
    }

    /// Downgrade a format without a formatter to plain
    pub fn resolve(&self, format: Format) -> Format {
        if self.contains(format) {
            format
        } else {
            tracing::debug!(%format, "formatter unavailable, falling back to plain");
            Format::Plain
        }
    }

    /// Render with the formatter for `format`, or plain if it is unavailable
    pub fn render(&self, format: Format, text: &str) -> Result<String> {
        match self.formatters.get(&self.resolve(format)) {
            Some(formatter) => formatter.to_html(text),
            None => self.fallback.to_html(text),
        }
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
