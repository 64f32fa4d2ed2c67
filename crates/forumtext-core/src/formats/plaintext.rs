// SPDX-License-Identifier: AGPL-3.0-or-later
//! Nearly-plain text formatter
//!
//! No markup syntax is needed. The whole input is HTML-escaped, then
//! processed line by line:
//! - an empty line becomes a paragraph break
//! - a line indented by four spaces opens (or continues) a `<pre>` block
//! - `http://` links in ordinary lines become `<a>` tags

use crate::format::Format;
use crate::traits::{Formatter, Result};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const INDENT: &str = "    ";
const PARAGRAPH_BREAK: &str = "</p>\n<p>";

// Runs over escaped text: `&` may only start `&amp;`, `&lt;` or `&gt;`, so an
// escaped quote (`&quot;`, `&#x27;`) ends the link.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://(?:[^\s&]|&(?:amp|lt|gt);)*(?:[^\s&.,?!]|&(?:amp|lt|gt);)").unwrap()
});

/// Plain text formatter, the fallback that is always available
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PlainFormatter {
    fn format(&self) -> Format {
        Format::Plain
    }

    fn to_html(&self, text: &str) -> Result<String> {
        Ok(format_plain(text))
    }
}

/// Escape `&`, `<`, `>` and both quote characters
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap bare `http://` links of an already escaped line in anchors
///
/// Trailing `.`, `,`, `?` and `!` stay outside the link.
pub fn autolink(escaped: &str) -> Cow<'_, str> {
    LINK_RE.replace_all(escaped, r#"<a href="${0}">${0}</a>"#)
}

/// Convert text to an HTML fragment wrapped in a single `<p>`
pub fn format_plain(text: &str) -> String {
    let escaped = escape_html(text);
    let mut lines: Vec<String> = Vec::new();
    let mut in_pre = false;

    for line in escaped.split('\n') {
        if line.is_empty() {
            if in_pre {
                lines.push(String::new());
            } else {
                lines.push(PARAGRAPH_BREAK.to_string());
            }
        } else if let Some(content) = line.strip_prefix(INDENT) {
            if in_pre {
                lines.push(content.to_string());
            } else {
                in_pre = true;
                lines.push(format!("<pre>{content}"));
            }
        } else {
            let line = if in_pre {
                in_pre = false;
                Cow::Owned(format!("</pre>{line}"))
            } else {
                Cow::Borrowed(line)
            };
            lines.push(autolink(&line).into_owned());
        }
    }

    // A block running to the end of the text is closed on its last line
    if in_pre {
        if let Some(last) = lines.last_mut() {
            last.push_str("</pre>");
        }
    }

    format!("<p>{}</p>", lines.join("\n"))
}
