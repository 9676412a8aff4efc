use anyhow::Context;
use gloss_core::Action;
use gloss_schema::TypeDefinition;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InspectArgs;
use crate::output::output;

/// Handle `gloss inspect`.
pub fn handle(args: &InspectArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&bind(args)?, flags.format)
}

/// Read the packaged definition and bind it to `Action`.
fn bind(args: &InspectArgs) -> anyhow::Result<TypeDefinition> {
    let definition = TypeDefinition::read_from(&args.path)
        .with_context(|| format!("failed to read type definition {}", args.path.display()))?;
    let annotated = definition
        .bind::<Action>()
        .with_context(|| format!("{} does not describe Action", args.path.display()))?;
    tracing::info!(
        type_name = annotated.name(),
        synthesis_id = annotated.synthesis_id(),
        "type definition bound"
    );
    Ok(annotated.definition())
}
