// SPDX-License-Identifier: AGPL-3.0-or-later
//! Format resolution and conversion entry points
//!
//! A post may start with a directive selecting its format:
//!
//! ```text
//! #rst
//! Some *reStructuredText* here.
//! ```
//!
//! The directive must be the first thing in the text (only whitespace may
//! precede it) and must be followed by a whitespace character. Without a
//! directive the configured default format is used. A format whose backend
//! is not available silently becomes plain.

use crate::format::Format;
use crate::settings::{configured_format, EnvSettings, Settings};
use crate::traits::{FormatterRegistry, Result};
use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#(plain|rst|markdown)\s").unwrap());

/// Find a leading directive, returning its format and the text after it
pub fn parse_directive(text: &str) -> Option<(Format, &str)> {
    let caps = DIRECTIVE_RE.captures(text)?;
    let format: Format = caps[1].parse().ok()?;
    let end = caps.get(0)?.end();
    Some((format, &text[end..]))
}

/// Format dispatcher bound to a registry and a settings source
pub struct Markup<'r, S = EnvSettings> {
    registry: &'r FormatterRegistry,
    settings: S,
}

impl<'r, S: Settings> Markup<'r, S> {
    pub fn new(registry: &'r FormatterRegistry, settings: S) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &FormatterRegistry {
        self.registry
    }

    /// Decide which formatter to use and what text to feed it
    ///
    /// An explicit format is used as is and the text is returned unchanged,
    /// even if it starts with a directive. Otherwise a leading directive is
    /// honoured and stripped, and failing that the configured default applies.
    /// The returned format always has a formatter in the registry.
    pub fn determine<'t>(&self, text: &'t str, format: Option<Format>) -> (Format, &'t str) {
        let (requested, text) = match format {
            Some(format) => (format, text),
            None => match parse_directive(text) {
                Some((format, rest)) => {
                    tracing::trace!(%format, "format selected by directive");
                    (format, rest)
                }
                None => (
                    configured_format(&self.settings).unwrap_or(Format::Plain),
                    text,
                ),
            },
        };

        (self.registry.resolve(requested), text)
    }

    /// Convert text to an HTML fragment
    ///
    /// Errors come only from the Markdown or reStructuredText backends.
    pub fn convert(&self, text: &str, format: Option<Format>) -> Result<String> {
        self.convert_resolved(text, format).map(|(_, html)| html)
    }

    /// [`Markup::convert`], also returning the format that was applied
    pub fn convert_resolved(
        &self,
        text: &str,
        format: Option<Format>,
    ) -> Result<(Format, String)> {
        let (format, text) = self.determine(text, format);
        tracing::trace!(%format, "converting");
        let html = self.registry.render(format, text)?;
        Ok((format, html))
    }
}

/// [`Markup::determine`] with the global registry and environment settings
pub fn determine(text: &str, format: Option<Format>) -> (Format, &str) {
    Markup::new(FormatterRegistry::global(), EnvSettings::default()).determine(text, format)
}

/// [`Markup::convert`] with the global registry and environment settings
pub fn convert(text: &str, format: Option<Format>) -> Result<String> {
    Markup::new(FormatterRegistry::global(), EnvSettings::default()).convert(text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MarkupConfig;
    use crate::traits::{Formatter, MarkupError};
    use pretty_assertions::assert_eq;

    struct Tagged(Format);

    impl Formatter for Tagged {
        fn format(&self) -> Format {
            self.0
        }

        fn to_html(&self, text: &str) -> Result<String> {
            Ok(format!("[{}]{}", self.0, text))
        }
    }

    struct Failing;

    impl Formatter for Failing {
        fn format(&self) -> Format {
            Format::Rst
        }

        fn to_html(&self, _text: &str) -> Result<String> {
            Err(MarkupError::Backend {
                format: Format::Rst,
                message: "unexpected indentation".to_string(),
            })
        }
    }

    fn full_registry() -> FormatterRegistry {
        let mut registry = FormatterRegistry::new();
        registry.register(Box::new(Tagged(Format::Markdown)));
        registry.register(Box::new(Tagged(Format::Rst)));
        registry
    }

    #[test]
    fn test_parse_directive() {
        assert_eq!(parse_directive("#rst foo"), Some((Format::Rst, "foo")));
        assert_eq!(parse_directive("  #markdown\nfoo"), Some((Format::Markdown, "foo")));
        assert_eq!(parse_directive("\n\n#plain  foo"), Some((Format::Plain, " foo")));
    }

    #[test]
    fn test_parse_directive_requires_trailing_whitespace() {
        assert_eq!(parse_directive("#rst"), None);
        assert_eq!(parse_directive("#rstfoo"), None);
    }

    #[test]
    fn test_parse_directive_anchored_at_start() {
        assert_eq!(parse_directive("text\n#rst foo"), None);
        assert_eq!(parse_directive("x #rst foo"), None);
        assert_eq!(parse_directive("#html foo"), None);
    }

    #[test]
    fn test_determine_directive_strips_prefix() {
        let registry = full_registry();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(markup.determine("#rst body", None), (Format::Rst, "body"));
    }

    #[test]
    fn test_determine_without_directive_uses_default() {
        let registry = full_registry();
        let markup = Markup::new(&registry, MarkupConfig::new(Format::Markdown));

        assert_eq!(markup.determine("body", None), (Format::Markdown, "body"));
    }

    #[test]
    fn test_determine_unknown_default_is_plain() {
        let registry = full_registry();
        let config = MarkupConfig {
            default_format: "textile".to_string(),
        };
        let markup = Markup::new(&registry, config);

        assert_eq!(markup.determine("body", None), (Format::Plain, "body"));
    }

    #[test]
    fn test_determine_unavailable_default_is_plain() {
        let registry = FormatterRegistry::new();
        let markup = Markup::new(&registry, MarkupConfig::new(Format::Rst));

        assert_eq!(markup.determine("body", None), (Format::Plain, "body"));
    }

    #[test]
    fn test_determine_unavailable_directive_still_strips() {
        let registry = FormatterRegistry::new();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(markup.determine("#rst body", None), (Format::Plain, "body"));
    }

    #[test]
    fn test_determine_explicit_format_keeps_directive() {
        let registry = full_registry();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(
            markup.determine("#rst body", Some(Format::Markdown)),
            (Format::Markdown, "#rst body")
        );
    }

    #[test]
    fn test_determine_explicit_unavailable_is_plain() {
        let registry = FormatterRegistry::new();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(
            markup.determine("body", Some(Format::Markdown)),
            (Format::Plain, "body")
        );
    }

    #[test]
    fn test_convert_dispatches() {
        let registry = full_registry();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(markup.convert("#markdown hi", None).unwrap(), "[markdown]hi");
        assert_eq!(markup.convert("hi", Some(Format::Rst)).unwrap(), "[rst]hi");
        assert_eq!(markup.convert("hi", None).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_convert_resolved_reports_format() {
        let registry = full_registry();
        let markup = Markup::new(&registry, MarkupConfig::default());

        assert_eq!(
            markup.convert_resolved("#rst hi", None).unwrap(),
            (Format::Rst, "[rst]hi".to_string())
        );

        let registry = FormatterRegistry::new();
        let markup = Markup::new(&registry, MarkupConfig::default());
        assert_eq!(
            markup.convert_resolved("hi", Some(Format::Markdown)).unwrap(),
            (Format::Plain, "<p>hi</p>".to_string())
        );
    }

    #[cfg(feature = "rst")]
    #[test]
    fn test_empty_rst_post_converts() {
        let registry = FormatterRegistry::with_available_backends();
        let markup = Markup::new(&registry, MarkupConfig::new(Format::Rst));

        assert_eq!(markup.convert("", None).unwrap(), "");
        assert_eq!(markup.convert("#rst\n", None).unwrap(), "");
    }

    #[test]
    fn test_convert_without_backends_matches_plain() {
        let registry = FormatterRegistry::new();
        let markup = Markup::new(&registry, MarkupConfig::default());
        let text = "Look: http://example.com.\n\n    x < y";
        let plain = markup.convert(text, Some(Format::Plain)).unwrap();

        assert_eq!(markup.convert(text, Some(Format::Markdown)).unwrap(), plain);
        assert_eq!(markup.convert(text, Some(Format::Rst)).unwrap(), plain);
        assert_eq!(
            markup.convert(&format!("#rst {text}"), None).unwrap(),
            plain
        );
    }

    #[test]
    fn test_convert_propagates_backend_errors() {
        let mut registry = FormatterRegistry::new();
        registry.register(Box::new(Failing));
        let markup = Markup::new(&registry, MarkupConfig::default());

        let err = markup.convert("#rst bad", None).unwrap_err();
        assert!(matches!(err, MarkupError::Backend { format: Format::Rst, .. }));
    }

    #[test]
    fn test_settings_consulted_per_call() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counting(AtomicUsize);

        impl Settings for Counting {
            fn default_format(&self) -> Option<String> {
                let n = self.0.fetch_add(1, Ordering::SeqCst);
                Some(if n == 0 { "markdown" } else { "rst" }.to_string())
            }
        }

        let registry = full_registry();
        let markup = Markup::new(&registry, Counting(AtomicUsize::new(0)));

        assert_eq!(markup.determine("x", None).0, Format::Markdown);
        assert_eq!(markup.determine("x", None).0, Format::Rst);
    }
}
