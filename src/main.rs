use anyhow::Result;
use clap::Parser;

mod cli;

use cli::commands::{apply::ApplyCommand, enabled::EnabledCommand, show::ShowCommand, validate::ValidateCommand};
use cli::{Cli, Commands};
use resource_workflow::{init_telemetry, EngineConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = EngineConfig::load_env_file() {
        eprintln!("⚠️  Ignoring .env file: {e}");
    }
    let config = EngineConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability)?;

    match cli.command {
        Commands::Validate => ValidateCommand::new(&config).execute(),
        Commands::Show { workflow } => ShowCommand::new(&config, workflow).execute(),
        Commands::Enabled { workflow, state } => EnabledCommand::new(&config, workflow, state).execute(),
        Commands::Apply {
            workflow,
            transition,
            state,
            json,
        } => ApplyCommand::new(&config, workflow, transition, state)
            .with_json(json)
            .execute(),
    }
}
