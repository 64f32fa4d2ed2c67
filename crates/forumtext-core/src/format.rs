// SPDX-License-Identifier: AGPL-3.0-or-later
//! Format selector

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traits::MarkupError;

/// Markup format a post is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Plain,
    Markdown,
    Rst,
}

impl Format {
    /// Name used in directives, configuration and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markdown => "markdown",
            Self::Rst => "rst",
        }
    }

    /// All formats in directive order
    pub const ALL: [Self; 3] = [Self::Plain, Self::Rst, Self::Markdown];
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "markdown" => Ok(Self::Markdown),
            "rst" => Ok(Self::Rst),
            other => Err(MarkupError::UnknownFormat(other.to_string())),
        }
    }
}
