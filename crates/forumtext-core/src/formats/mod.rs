// SPDX-License-Identifier: AGPL-3.0-or-later
//! Formatters for each supported format

pub mod plaintext;

#[cfg(feature = "markdown")]
pub mod markdown;

#[cfg(feature = "rst")]
pub mod rst;

pub use plaintext::PlainFormatter;

#[cfg(feature = "markdown")]
pub use markdown::{MarkdownFormatter, MarkdownOptions};

#[cfg(feature = "rst")]
pub use rst::{RstFormatter, RstOptions};
