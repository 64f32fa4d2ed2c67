// SPDX-License-Identifier: AGPL-3.0-or-later
//! Forumtext CLI - render forum posts to HTML.
//!
//! Provides commands for:
//! - `convert`: Render a post to an HTML fragment
//! - `determine`: Show which format a post would be rendered with
//! - `preview`: Write a standalone page with output and source
//! - `formats`: List formats available in this build

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, DetermineArgs, PreviewArgs};

/// Forumtext - render plain text, Markdown and reStructuredText posts to HTML.
#[derive(Parser)]
#[command(name = "forumtext", version, about)]
struct Cli {
    /// Path to a forumtext.toml configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at info level instead of using RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post to an HTML fragment.
    Convert(ConvertArgs),
    /// Print the format a post resolves to.
    Determine(DetermineArgs),
    /// Write a standalone preview page.
    Preview(PreviewArgs),
    /// List formats available in this build.
    Formats,
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Convert(args) => args.execute(config),
        Commands::Determine(args) => args.execute(config),
        Commands::Preview(args) => args.execute(config),
        Commands::Formats => commands::list_formats(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
