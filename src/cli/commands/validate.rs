use anyhow::Result;
use resource_workflow::EngineConfig;

use super::load_definitions;

pub struct ValidateCommand<'a> {
    config: &'a EngineConfig,
}

impl<'a> ValidateCommand<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let definitions = load_definitions(self.config)?;

        for definition in &definitions {
            println!(
                "✅ {} ({} states, {} transitions)",
                definition.name(),
                definition.states().len(),
                definition.transitions().len()
            );
        }
        println!();
        println!("All {} workflows are valid", definitions.len());
        Ok(())
    }
}
