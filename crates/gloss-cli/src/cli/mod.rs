use std::path::PathBuf;

use clap::Parser;
use gloss_config::GlossConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gloss` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gloss",
    version,
    about = "Gloss - field metadata annotation for record exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw (defaults to export.pretty from config)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file to use instead of the configured or built-in one
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self, config: &GlossConfig) -> GlobalFlags {
        let format = self.format.unwrap_or(if config.export.pretty {
            OutputFormat::Json
        } else {
            OutputFormat::Raw
        });
        GlobalFlags {
            format,
            catalog: self.catalog.clone(),
        }
    }
}
