use anyhow::{Context, Result};
use resource_workflow::{builtin_definitions, DefinitionError, EngineConfig, Marking, Workflow, WorkflowDefinition, WorkflowRegistry};
use std::collections::BTreeMap;

pub mod apply;
pub mod enabled;
pub mod show;
pub mod validate;

/// Bundled definitions overlaid with configured ones of the same name
pub fn load_definitions(config: &EngineConfig) -> Result<Vec<WorkflowDefinition>> {
    let mut definitions: BTreeMap<String, WorkflowDefinition> = builtin_definitions()
        .context("Bundled workflow definitions are invalid")?
        .into_iter()
        .map(|d| (d.name().to_string(), d))
        .collect();

    for definition in config.definitions()? {
        if definitions.contains_key(definition.name()) {
            tracing::info!(workflow = %definition.name(), "Configured workflow overrides bundled definition");
        }
        definitions.insert(definition.name().to_string(), definition);
    }

    Ok(definitions.into_values().collect())
}

/// Workflows available to the dry-run commands.
///
/// Workflows that name guards cannot be built without the application that
/// supplies them. They are skipped here and the reason is kept, so the error
/// only surfaces when such a workflow is asked for by name.
pub struct DryRunWorkflows {
    registry: WorkflowRegistry<Marking>,
    skipped: BTreeMap<String, DefinitionError>,
}

impl DryRunWorkflows {
    pub fn get(&self, name: &str) -> Result<&Workflow<Marking>> {
        if let Some(reason) = self.skipped.get(name) {
            return Err(anyhow::Error::new(reason.clone())
                .context(format!("Workflow '{name}' needs guards that are only available to applications")));
        }
        Ok(self.registry.get(name)?)
    }
}

pub fn load_registry(config: &EngineConfig) -> Result<DryRunWorkflows> {
    let mut registry = WorkflowRegistry::new();
    let mut skipped = BTreeMap::new();

    for definition in load_definitions(config)? {
        let name = definition.name().to_string();
        match Workflow::new(definition) {
            Ok(workflow) => registry.register(workflow)?,
            Err(reason) => {
                tracing::warn!(workflow = %name, reason = %reason, "Skipping workflow for dry runs");
                skipped.insert(name, reason);
            }
        }
    }

    Ok(DryRunWorkflows { registry, skipped })
}

/// Scratch entity placed in `state`, or in the initial state when none is given
pub fn scratch_entity(workflow: &Workflow<Marking>, state: Option<&str>) -> Marking {
    let mut entity = Marking::new();
    match state {
        Some(state) => entity = entity.with(workflow.name(), state),
        None => workflow.initialize(&mut entity),
    }
    entity
}
