// SPDX-License-Identifier: AGPL-3.0-or-later
//! Standalone preview page showing rendered output next to its source

use crate::format::Format;
use crate::formats::plaintext::escape_html;

/// Wrap a rendered fragment and its source in a complete HTML page
pub fn render_preview(source: &str, format: Format, html: &str) -> String {
    let mut page = String::with_capacity(html.len() + source.len() * 2 + 256);
    page.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
    page.push_str("    <meta charset=\"utf-8\">\n");
    page.push_str(&format!("    <title>forumtext preview ({format})</title>\n"));
    page.push_str("  </head>\n  <body>\n");
    page.push_str(&format!("    <div class=\"output format-{format}\">\n"));
    page.push_str(html);
    page.push_str("\n    </div>\n    <hr>\n");
    page.push_str("    <div><pre class=\"source\">");
    page.push_str(&escape_html(source));
    page.push_str("</pre></div>\n  </body>\n</html>\n");
    page
}
