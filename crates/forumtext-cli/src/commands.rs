// SPDX-License-Identifier: AGPL-3.0-or-later
//! Subcommand implementations

use anyhow::{Context, Result};
use clap::Args;
use forumtext_core::preview::render_preview;
use forumtext_core::{EnvSettings, Format, FormatterRegistry, Markup, MarkupConfig};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Input selection shared by all commands
#[derive(Args)]
pub struct InputArgs {
    /// Source file, `-` or omitted for stdin.
    input: Option<PathBuf>,

    /// Format to use instead of the directive or configured default.
    #[arg(short, long)]
    format: Option<Format>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
pub struct DetermineArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Page to write.
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
}

fn markup(config: Option<&Path>) -> Result<Markup<'static, EnvSettings>> {
    let config = match config {
        Some(path) => MarkupConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => MarkupConfig::default(),
    };
    Ok(Markup::new(FormatterRegistry::global(), EnvSettings::new(config)))
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

impl ConvertArgs {
    pub fn execute(self, config: Option<&Path>) -> Result<()> {
        let markup = markup(config)?;
        let text = self.input.read()?;
        let (format, html) = markup
            .convert_resolved(&text, self.input.format)
            .context("Failed to render post")?;
        tracing::info!(%format, "converted");
        write_output(self.output.as_deref(), &html)
    }
}

impl DetermineArgs {
    pub fn execute(self, config: Option<&Path>) -> Result<()> {
        let markup = markup(config)?;
        let text = self.input.read()?;
        let (format, _) = markup.determine(&text, self.input.format);
        println!("{format}");
        Ok(())
    }
}

impl PreviewArgs {
    pub fn execute(self, config: Option<&Path>) -> Result<()> {
        let markup = markup(config)?;
        let text = self.input.read()?;
        let (format, html) = markup
            .convert_resolved(&text, self.input.format)
            .context("Failed to render post")?;
        let page = render_preview(&text, format, &html);
        write_output(Some(self.output.as_path()), &page)?;
        tracing::info!(path = %self.output.display(), %format, "wrote preview");
        Ok(())
    }
}

pub fn list_formats() -> Result<()> {
    let registry = FormatterRegistry::global();
    for format in Format::ALL {
        let status = if registry.contains(format) {
            "available"
        } else {
            "unavailable"
        };
        println!("{format}\t{status}");
    }
    Ok(())
}
