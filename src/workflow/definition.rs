use serde::Serialize;
use std::collections::HashSet;

use super::errors::DefinitionError;
use crate::config::WorkflowConfig;

/// A named edge from a set of source states to a single target state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionDefinition {
    name: String,
    from: Vec<String>,
    to: String,
    /// Name of a guard resolved when the workflow is assembled
    guard: Option<String>,
    label: Option<String>,
}

impl TransitionDefinition {
    pub fn new<I, S>(name: impl Into<String>, from: I, to: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into(),
            guard: None,
            label: None,
        }
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> &[String] {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn starts_from(&self, state: &str) -> bool {
        self.from.iter().any(|s| s == state)
    }
}

/// Immutable, validated description of one workflow.
///
/// Only [`WorkflowDefinitionBuilder::build`] and [`WorkflowDefinition::from_config`]
/// produce values of this type, so every instance satisfies:
/// - at least one state, no duplicates
/// - the initial state is declared
/// - transition names are unique
/// - every transition has a non-empty source set and all its states are declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowDefinition {
    name: String,
    initial: String,
    states: Vec<String>,
    transitions: Vec<TransitionDefinition>,
}

impl WorkflowDefinition {
    pub fn builder(name: impl Into<String>) -> WorkflowDefinitionBuilder {
        WorkflowDefinitionBuilder {
            name: name.into(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Build a definition from its configuration file representation
    pub fn from_config(name: &str, config: &WorkflowConfig) -> Result<Self, DefinitionError> {
        let mut builder = Self::builder(name).states(config.states.iter().cloned());

        if let Some(initial) = &config.initial {
            builder = builder.initial(initial.clone());
        }

        for transition in &config.transitions {
            let mut definition = TransitionDefinition::new(
                transition.name.clone(),
                transition.from.iter().cloned(),
                transition.to.clone(),
            );
            if let Some(guard) = &transition.guard {
                definition = definition.with_guard(guard.clone());
            }
            if let Some(label) = &transition.label {
                definition = definition.with_label(label.clone());
            }
            builder = builder.add_transition(definition);
        }

        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn transitions(&self) -> &[TransitionDefinition] {
        &self.transitions
    }

    pub fn transition(&self, name: &str) -> Option<&TransitionDefinition> {
        self.transitions.iter().find(|t| t.name == name)
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// States that no transition leaves from, in declaration order
    pub fn terminal_states(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|state| self.is_terminal(state))
            .map(String::as_str)
            .collect()
    }

    pub fn is_terminal(&self, state: &str) -> bool {
        !self.transitions.iter().any(|t| t.starts_from(state))
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowDefinitionBuilder {
    name: String,
    initial: Option<String>,
    states: Vec<String>,
    transitions: Vec<TransitionDefinition>,
}

impl WorkflowDefinitionBuilder {
    /// Defaults to the first declared state when not set
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.push(state.into());
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn transition<I, S>(self, name: impl Into<String>, from: I, to: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_transition(TransitionDefinition::new(name, from, to))
    }

    pub fn add_transition(mut self, transition: TransitionDefinition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn build(self) -> Result<WorkflowDefinition, DefinitionError> {
        let workflow = self.name;

        let Some(first) = self.states.first() else {
            return Err(DefinitionError::NoStates { workflow });
        };
        let initial = self.initial.unwrap_or_else(|| first.clone());

        let mut declared = HashSet::new();
        for state in &self.states {
            if !declared.insert(state.as_str()) {
                return Err(DefinitionError::DuplicateState {
                    workflow,
                    state: state.clone(),
                });
            }
        }

        if !declared.contains(initial.as_str()) {
            return Err(DefinitionError::UnknownInitialState {
                workflow,
                state: initial,
            });
        }

        let mut names = HashSet::new();
        for transition in &self.transitions {
            if !names.insert(transition.name.as_str()) {
                return Err(DefinitionError::DuplicateTransition {
                    workflow,
                    transition: transition.name.clone(),
                });
            }
            if transition.from.is_empty() {
                return Err(DefinitionError::EmptyFromSet {
                    workflow,
                    transition: transition.name.clone(),
                });
            }
            if let Some(state) = transition
                .from
                .iter()
                .find(|s| !declared.contains(s.as_str()))
            {
                return Err(DefinitionError::UnknownFromState {
                    workflow,
                    transition: transition.name.clone(),
                    state: state.clone(),
                });
            }
            if !declared.contains(transition.to.as_str()) {
                return Err(DefinitionError::UnknownToState {
                    workflow,
                    transition: transition.name.clone(),
                    state: transition.to.clone(),
                });
            }
        }

        Ok(WorkflowDefinition {
            name: workflow,
            initial,
            states: self.states,
            transitions: self.transitions,
        })
    }
}
