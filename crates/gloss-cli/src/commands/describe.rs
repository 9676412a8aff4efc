use gloss_config::GlossConfig;
use serde_json::Value;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::DescribeArgs;
use crate::output::output;

/// Handle `gloss describe`.
pub fn handle(args: &DescribeArgs, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, config, flags)?, flags.format)
}

fn build(args: &DescribeArgs, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<Value> {
    let catalog = bootstrap::load_active_catalog(config, flags)?;
    let described = match &args.field {
        Some(field) => serde_json::to_value(catalog.describe(field)?)?,
        None => serde_json::to_value(catalog.entries())?,
    };
    Ok(described)
}
