// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markdown formatter using comrak

use crate::format::Format;
use crate::traits::{Formatter, Result};
use comrak::{markdown_to_html, Options};

/// Security and rendering settings passed to comrak
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Pass raw HTML blocks and inline tags through to the output
    pub unsafe_html: bool,
}

/// Markdown formatter (GFM-compatible)
pub struct MarkdownFormatter {
    options: MarkdownOptions,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self::with_options(MarkdownOptions::default())
    }

    pub fn with_options(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn comrak_options(&self) -> Options<'static> {
        let mut options = Options::default();
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.render.unsafe_ = self.options.unsafe_html;
        options
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for MarkdownFormatter {
    fn format(&self) -> Format {
        Format::Markdown
    }

    fn to_html(&self, text: &str) -> Result<String> {
        Ok(markdown_to_html(text, &self.comrak_options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis() {
        let html = MarkdownFormatter::new().to_html("Some *grail*.").unwrap();
        assert!(html.contains("<em>grail</em>"), "{html}");
    }

    #[test]
    fn test_heading() {
        let html = MarkdownFormatter::new().to_html("# Title").unwrap();
        assert!(html.contains("<h1>Title</h1>"), "{html}");
    }

    #[test]
    fn test_void_tags_are_xhtml_style() {
        let html = MarkdownFormatter::new().to_html("above\n\n---\n\nbelow").unwrap();
        assert!(html.contains("<hr />"), "{html}");
    }

    #[test]
    fn test_raw_html_is_not_passed_through() {
        let html = MarkdownFormatter::new()
            .to_html("before\n\n<script>alert(1)</script>\n\nafter <b>x</b>")
            .unwrap();
        assert!(!html.contains("<script>"), "{html}");
        assert!(!html.contains("<b>"), "{html}");
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn test_unsafe_option_passes_html() {
        let formatter = MarkdownFormatter::with_options(MarkdownOptions { unsafe_html: true });
        let html = formatter.to_html("after <b>x</b>").unwrap();
        assert!(html.contains("<b>x</b>"), "{html}");
    }

    #[test]
    fn test_bare_links_are_autolinked() {
        let html = MarkdownFormatter::new()
            .to_html("See https://example.com now")
            .unwrap();
        assert!(html.contains("<a href=\"https://example.com\">"), "{html}");
    }
}
