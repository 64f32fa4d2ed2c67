// SPDX-License-Identifier: AGPL-3.0-or-later
//! reStructuredText formatter using rst_parser and rst_renderer

use crate::format::Format;
use crate::traits::{Formatter, MarkupError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static RAW_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\.\.[ \t]+raw[ \t]*::").unwrap());
static INCLUDE_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\.\.[ \t]+include[ \t]*::").unwrap());

/// Security settings for the reStructuredText backend
#[derive(Debug, Clone, Default)]
pub struct RstOptions {
    /// Allow `.. raw::` to inject markup into the output
    pub raw_enabled: bool,
    /// Allow `.. include::` to read files
    pub file_insertion_enabled: bool,
}

/// reStructuredText formatter producing the HTML body only
pub struct RstFormatter {
    options: RstOptions,
}

impl RstFormatter {
    pub fn new() -> Self {
        Self::with_options(RstOptions::default())
    }

    pub fn with_options(options: RstOptions) -> Self {
        Self { options }
    }

    /// Turn disabled directives into comments so their bodies are dropped
    fn neutralise<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(text);
        if !self.options.raw_enabled && RAW_DIRECTIVE_RE.is_match(&text) {
            text = Cow::Owned(
                RAW_DIRECTIVE_RE
                    .replace_all(&text, "${1}.. disabled raw directive")
                    .into_owned(),
            );
        }
        if !self.options.file_insertion_enabled && INCLUDE_DIRECTIVE_RE.is_match(&text) {
            text = Cow::Owned(
                INCLUDE_DIRECTIVE_RE
                    .replace_all(&text, "${1}.. disabled include directive")
                    .into_owned(),
            );
        }
        text
    }
}

impl Default for RstFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for RstFormatter {
    fn format(&self) -> Format {
        Format::Rst
    }

    fn to_html(&self, text: &str) -> Result<String> {
        let source = self.neutralise(text);
        if source.trim().is_empty() {
            return Ok(String::new());
        }

        let doc = rst_parser::parse(&source).map_err(|e| MarkupError::Backend {
            format: Format::Rst,
            message: format!("parse error: {e}"),
        })?;

        let mut out = Vec::new();
        rst_renderer::render_html(&doc, &mut out, false).map_err(|e| MarkupError::Backend {
            format: Format::Rst,
            message: format!("render error: {e}"),
        })?;

        String::from_utf8(out).map_err(|e| MarkupError::Backend {
            format: Format::Rst,
            message: e.to_string(),
        })
    }
}
