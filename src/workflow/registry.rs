use std::collections::BTreeMap;

use super::engine::{AppliedTransition, Workflow};
use super::errors::{DefinitionError, WorkflowError};
use super::marking::Stateful;

/// Process-wide set of named workflows over one entity type
#[derive(Debug)]
pub struct WorkflowRegistry<E> {
    workflows: BTreeMap<String, Workflow<E>>,
}

impl<E> Default for WorkflowRegistry<E> {
    fn default() -> Self {
        Self {
            workflows: BTreeMap::new(),
        }
    }
}

impl<E: Stateful> WorkflowRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, workflow: Workflow<E>) -> Result<(), DefinitionError> {
        let name = workflow.name().to_string();
        if self.workflows.contains_key(&name) {
            return Err(DefinitionError::DuplicateWorkflow { workflow: name });
        }

        tracing::debug!(
            workflow = %name,
            states = workflow.definition().states().len(),
            transitions = workflow.definition().transitions().len(),
            "Registered workflow"
        );
        self.workflows.insert(name, workflow);
        Ok(())
    }

    pub fn with(mut self, workflow: Workflow<E>) -> Result<Self, DefinitionError> {
        self.register(workflow)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Workflow<E>, WorkflowError> {
        self.workflows
            .get(name)
            .ok_or_else(|| WorkflowError::UnknownWorkflow {
                workflow: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workflows.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.workflows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workflow<E>> {
        self.workflows.values()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn enabled_transitions(&self, entity: &E, workflow: &str) -> Result<Vec<&str>, WorkflowError> {
        self.get(workflow)?.enabled_transitions(entity)
    }

    pub fn can(&self, entity: &E, workflow: &str, transition: &str) -> Result<bool, WorkflowError> {
        self.get(workflow)?.can(entity, transition)
    }

    pub fn apply(&self, entity: &mut E, workflow: &str, transition: &str) -> Result<AppliedTransition, WorkflowError> {
        self.get(workflow)?.apply(entity, transition)
    }

    /// Enabled transitions in every registered workflow the entity takes part in
    pub fn enabled_by_workflow(&self, entity: &E) -> Result<BTreeMap<&str, Vec<&str>>, WorkflowError> {
        let mut enabled = BTreeMap::new();
        for workflow in self.workflows.values() {
            if entity.state(workflow.name()).is_some() {
                enabled.insert(workflow.name(), workflow.enabled_transitions(entity)?);
            }
        }
        Ok(enabled)
    }
}
