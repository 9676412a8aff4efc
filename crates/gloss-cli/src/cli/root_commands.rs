use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build an annotated Action and print its metadata-aware document.
    Export(ExportArgs),
    /// Print the JSON Schema of exported documents.
    Schema(SchemaArgs),
    /// Show catalog entries.
    Describe(DescribeArgs),
    /// Load a packaged type definition and verify it against Action.
    Inspect(InspectArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// JSON file holding an Action (`ID`, `Type`, `Scheduled`, `Entered`, `Comment`)
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub id: Option<i32>,

    /// Action type code
    #[arg(long = "type")]
    pub action_type: Option<i32>,

    /// Scheduled date (`YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`)
    #[arg(long, value_parser = parse_timestamp)]
    pub scheduled: Option<NaiveDateTime>,

    /// Entered date (`YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`)
    #[arg(long, value_parser = parse_timestamp)]
    pub entered: Option<NaiveDateTime>,

    #[arg(long)]
    pub comment: Option<String>,

    /// Drop a field's catalog entry before synthesis (repeatable)
    #[arg(long = "omit", value_name = "FIELD")]
    pub omit: Vec<String>,

    /// Also write the packaged type definition to this path
    #[arg(long)]
    pub package: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Print the schema of packaged type definitions instead
    #[arg(long)]
    pub definition: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DescribeArgs {
    /// Only show this field
    pub field: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct InspectArgs {
    /// Packaged type definition (JSON)
    pub path: PathBuf,
}

/// Parse a timestamp flag. Accepts a bare date (midnight) or a full
/// date-time with optional fractional seconds.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("invalid timestamp '{raw}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"))
}
