// SPDX-License-Identifier: AGPL-3.0-or-later
//! Forumtext Core - Markup selection and HTML rendering for posts
//!
//! This crate provides:
//! - A nearly-plain text formatter (paragraphs, `<pre>` blocks, autolinks)
//! - Markdown (comrak) and reStructuredText (rst_parser) backends behind
//!   cargo features
//! - A registry of available formatters with fallback to plain text
//! - Format selection from an explicit format, a `#format` directive or the
//!   configured default

pub mod format;
pub mod formats;
pub mod preview;
pub mod resolve;
pub mod settings;
pub mod traits;

pub use format::Format;
pub use formats::plaintext::format_plain;
pub use resolve::{convert, determine, parse_directive, Markup};
pub use settings::{EnvSettings, MarkupConfig, Settings};
pub use traits::{Formatter, FormatterRegistry, MarkupError, Result};
