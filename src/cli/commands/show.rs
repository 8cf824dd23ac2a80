use anyhow::{anyhow, Result};
use resource_workflow::EngineConfig;

use super::load_definitions;

pub struct ShowCommand<'a> {
    config: &'a EngineConfig,
    workflow: String,
}

impl<'a> ShowCommand<'a> {
    pub fn new(config: &'a EngineConfig, workflow: String) -> Self {
        Self { config, workflow }
    }

    pub fn execute(&self) -> Result<()> {
        let definition = load_definitions(self.config)?
            .into_iter()
            .find(|d| d.name() == self.workflow)
            .ok_or_else(|| anyhow!("Unknown workflow '{}'", self.workflow))?;

        println!("📋 WORKFLOW: {}", definition.name());
        println!("Initial state: {}", definition.initial_state());
        println!("States: {}", definition.states().join(", "));
        println!();
        println!("Transitions:");
        for transition in definition.transitions() {
            let guard = transition
                .guard()
                .map(|g| format!(" [guard: {g}]"))
                .unwrap_or_default();
            println!(
                "  {}: {} -> {}{}",
                transition.name(),
                transition.from().join("|"),
                transition.to(),
                guard
            );
        }
        println!();
        println!("Terminal states: {}", definition.terminal_states().join(", "));
        Ok(())
    }
}
