use anyhow::Result;
use resource_workflow::EngineConfig;

use super::{load_registry, scratch_entity};

pub struct EnabledCommand<'a> {
    config: &'a EngineConfig,
    workflow: String,
    state: Option<String>,
}

impl<'a> EnabledCommand<'a> {
    pub fn new(config: &'a EngineConfig, workflow: String, state: Option<String>) -> Self {
        Self {
            config,
            workflow,
            state,
        }
    }

    pub fn execute(&self) -> Result<()> {
        let registry = load_registry(self.config)?;
        let workflow = registry.get(&self.workflow)?;
        let entity = scratch_entity(workflow, self.state.as_deref());
        let state = workflow.current_state(&entity)?;

        let enabled = workflow.enabled_transitions(&entity)?;
        if enabled.is_empty() {
            println!("No transitions enabled from '{state}' (terminal state)");
        } else {
            println!("Enabled from '{state}':");
            for transition in enabled {
                println!("  {transition}");
            }
        }
        Ok(())
    }
}
