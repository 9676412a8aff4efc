use gloss_config::GlossConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod describe;
pub mod export;
pub mod inspect;
pub mod schema;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &GlossConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Export(args) => export::handle(&args, config, flags),
        Commands::Schema(args) => schema::handle(&args, config, flags),
        Commands::Describe(args) => describe::handle(&args, config, flags),
        Commands::Inspect(args) => inspect::handle(&args, flags),
    }
}
