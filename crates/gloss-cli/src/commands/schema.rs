use gloss_config::GlossConfig;
use gloss_core::Action;
use gloss_schema::{TypeDefinition, document_schema, synthesize};
use serde_json::Value;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `gloss schema`.
pub fn handle(args: &SchemaArgs, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(args, config, flags)?, flags.format)
}

fn build(args: &SchemaArgs, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<Value> {
    if args.definition {
        return Ok(serde_json::to_value(schemars::schema_for!(TypeDefinition))?);
    }

    let catalog = bootstrap::load_active_catalog(config, flags)?;
    let annotated = synthesize::<Action>(&catalog)?;
    Ok(document_schema(&annotated)?)
}
