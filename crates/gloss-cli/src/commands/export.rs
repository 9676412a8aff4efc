use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use gloss_config::GlossConfig;
use gloss_core::{Action, FieldValue};
use gloss_schema::{AnnotatedInstance, ExportedDocument, synthesize};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::output::output;

/// Handle `gloss export`.
pub fn handle(args: &ExportArgs, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = build(args, config, flags)?;
    output(&document, flags.format)
}

/// Synthesize, fill, and export the annotated `Action`, packaging the type
/// when `--package` or `export.artifact_path` names a target.
fn build(
    args: &ExportArgs,
    config: &GlossConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExportedDocument> {
    let mut catalog = bootstrap::load_active_catalog(config, flags)?;
    for field in &args.omit {
        catalog = catalog.without(field);
    }

    let annotated = Arc::new(synthesize::<Action>(&catalog)?);

    let record = match &args.input {
        Some(path) => read_action(path)?,
        None => Action::default(),
    };
    let mut instance = annotated.wrap(record);
    apply_flags(&mut instance, args)?;

    let document = instance.export()?;

    if let Some(path) = args.package.as_deref().or_else(|| config.export.artifact_path()) {
        annotated
            .definition()
            .write_to(path)
            .with_context(|| format!("failed to package {}", annotated.name()))?;
    }
    Ok(document)
}

fn read_action(path: &Path) -> anyhow::Result<Action> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid Action in {}", path.display()))
}

/// Write each flag that was given through the forwarding accessors.
fn apply_flags(instance: &mut AnnotatedInstance<Action>, args: &ExportArgs) -> anyhow::Result<()> {
    let updates = [
        ("ID", args.id.map(FieldValue::from)),
        ("Type", args.action_type.map(FieldValue::from)),
        ("Scheduled", args.scheduled.map(FieldValue::from)),
        ("Entered", args.entered.map(FieldValue::from)),
        ("Comment", args.comment.clone().map(FieldValue::from)),
    ];
    for (field, value) in updates {
        if let Some(value) = value {
            instance
                .set(field, Some(value))
                .with_context(|| format!("failed to set {field}"))?;
        }
    }
    Ok(())
}
