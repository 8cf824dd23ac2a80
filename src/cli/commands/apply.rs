use anyhow::Result;
use resource_workflow::{create_transition_span, generate_correlation_id, EngineConfig};

use super::{load_registry, scratch_entity};

pub struct ApplyCommand<'a> {
    config: &'a EngineConfig,
    workflow: String,
    transition: String,
    state: Option<String>,
    json: bool,
}

impl<'a> ApplyCommand<'a> {
    pub fn new(
        config: &'a EngineConfig,
        workflow: String,
        transition: String,
        state: Option<String>,
    ) -> Self {
        Self {
            config,
            workflow,
            transition,
            state,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute(&self) -> Result<()> {
        let correlation_id = generate_correlation_id();
        let span = create_transition_span(&self.workflow, Some(&self.transition), Some(&correlation_id));
        let _entered = span.enter();

        let registry = load_registry(self.config)?;
        let workflow = registry.get(&self.workflow)?;
        let mut entity = scratch_entity(workflow, self.state.as_deref());

        let applied = workflow.apply(&mut entity, &self.transition)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&applied)?);
        } else {
            println!(
                "✅ {}: {} -> {} via '{}'",
                applied.workflow, applied.from, applied.to, applied.transition
            );
            let next = workflow.enabled_transitions(&entity)?;
            if next.is_empty() {
                println!("'{}' is a terminal state", applied.to);
            } else {
                println!("Next: {}", next.join(", "));
            }
        }
        Ok(())
    }
}
