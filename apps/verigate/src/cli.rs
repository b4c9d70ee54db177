//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use verigate_types::ColorChoice;

/// verigate - Content verification against trusted sources
#[derive(Parser)]
#[command(name = "verigate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Content verification against trusted sources and red-flag patterns")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (JSON lines on stderr)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify one piece of content against its claimed source
    ///
    /// Content is taken from the argument, from --file, or from stdin when
    /// neither is given. Exits with status 2 when the content is not verified.
    #[command(alias = "v")]
    Verify {
        /// Claimed source of the content (URL or identifier)
        #[arg(short, long)]
        source: String,

        /// Read content from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "content")]
        file: Option<PathBuf>,

        /// Content to verify
        content: Option<String>,
    },

    /// Verify every item of a JSON-lines file
    ///
    /// Each non-blank line must be {"content": "...", "source": "..."}.
    Batch {
        /// Path to the JSON-lines file
        path: PathBuf,
    },

    /// List the trusted source registry
    Sources,

    /// List pattern rules and verification policy
    Rules,

    /// Print the effective configuration as TOML
    Config,
}
