use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::definition::{TransitionDefinition, WorkflowDefinition};
use super::errors::{BlockReason, DefinitionError, WorkflowError};
use super::marking::Stateful;

/// Side-effect-free predicate deciding whether a transition may fire
pub trait Guard<E>: Send + Sync {
    fn allows(&self, entity: &E) -> bool;
}

impl<E, F> Guard<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn allows(&self, entity: &E) -> bool {
        self(entity)
    }
}

/// Notification run after a transition has been committed to the entity
pub trait TransitionHook<E>: Send + Sync {
    fn on_transition(&self, entity: &E, applied: &AppliedTransition) -> anyhow::Result<()>;
}

impl<E, F> TransitionHook<E> for F
where
    F: Fn(&E, &AppliedTransition) -> anyhow::Result<()> + Send + Sync,
{
    fn on_transition(&self, entity: &E, applied: &AppliedTransition) -> anyhow::Result<()> {
        self(entity, applied)
    }
}

/// Record of a successful transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTransition {
    pub workflow: String,
    pub transition: String,
    pub from: String,
    pub to: String,
}

/// An enabled transition as presented to UI layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub label: Option<String>,
}

/// A guard together with the name it was registered under, if any
struct RegisteredGuard<E> {
    name: Option<String>,
    guard: Arc<dyn Guard<E>>,
}

struct RegisteredHook<E> {
    /// `None` runs after every transition of the workflow
    transition: Option<String>,
    hook: Arc<dyn TransitionHook<E>>,
}

/// Drives an entity's state field through the transitions of one definition
pub struct Workflow<E> {
    definition: Arc<WorkflowDefinition>,
    guards: HashMap<String, Vec<RegisteredGuard<E>>>,
    hooks: Vec<RegisteredHook<E>>,
}

impl<E> std::fmt::Debug for Workflow<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("definition", &self.definition)
            .field("guarded_transitions", &self.guards.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl<E: Stateful> Workflow<E> {
    /// Workflow without extra guards or hooks. Fails if the definition names guards.
    pub fn new(definition: WorkflowDefinition) -> Result<Self, DefinitionError> {
        Self::builder(definition).build()
    }

    pub fn builder(definition: impl Into<Arc<WorkflowDefinition>>) -> WorkflowBuilder<E> {
        WorkflowBuilder {
            definition: definition.into(),
            named_guards: HashMap::new(),
            guards: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    /// Put a freshly created entity into the workflow's initial state
    pub fn initialize(&self, entity: &mut E) {
        entity.set_state(self.name(), self.definition.initial_state());
    }

    /// Current state of the entity, checked against the declared states
    pub fn current_state<'a>(&self, entity: &'a E) -> Result<&'a str, WorkflowError> {
        let state = entity
            .state(self.name())
            .ok_or_else(|| WorkflowError::MissingState {
                workflow: self.name().to_string(),
            })?;

        if !self.definition.has_state(state) {
            return Err(WorkflowError::InvalidState {
                workflow: self.name().to_string(),
                state: state.to_string(),
            });
        }

        Ok(state)
    }

    /// Names of every transition that could be applied now, in declaration order.
    /// Empty for entities in a terminal state.
    pub fn enabled_transitions(&self, entity: &E) -> Result<Vec<&str>, WorkflowError> {
        let state = self.current_state(entity)?;

        let enabled: Vec<&str> = self
            .definition
            .transitions()
            .iter()
            .filter(|t| self.blocker(entity, t, state).is_none())
            .map(TransitionDefinition::name)
            .collect();

        debug!(
            workflow = %self.name(),
            state = %state,
            enabled = ?enabled,
            "Evaluated enabled transitions"
        );

        Ok(enabled)
    }

    /// Enabled transitions with their display labels
    pub fn enabled_actions(&self, entity: &E) -> Result<Vec<Action>, WorkflowError> {
        let state = self.current_state(entity)?;

        Ok(self
            .definition
            .transitions()
            .iter()
            .filter(|t| self.blocker(entity, t, state).is_none())
            .map(|t| Action {
                name: t.name().to_string(),
                label: t.label().map(str::to_string),
            })
            .collect())
    }

    pub fn can(&self, entity: &E, transition: &str) -> Result<bool, WorkflowError> {
        let definition = self.transition(transition)?;
        let state = self.current_state(entity)?;
        Ok(self.blocker(entity, definition, state).is_none())
    }

    /// Move the entity along `transition`.
    ///
    /// Guards decide; hooks only observe. A rejected transition leaves the entity
    /// untouched. Once accepted, the new state is written before hooks run, and a
    /// failing hook is reported as [`WorkflowError::HookFailed`] without rolling
    /// the state back. Hooks after the failing one are skipped.
    pub fn apply(&self, entity: &mut E, transition: &str) -> Result<AppliedTransition, WorkflowError> {
        let definition = self.transition(transition)?;
        let from = self.current_state(entity)?.to_string();

        if let Some(reason) = self.blocker(entity, definition, &from) {
            warn!(
                workflow = %self.name(),
                transition = %transition,
                state = %from,
                reason = %reason,
                "Transition rejected"
            );
            return Err(WorkflowError::NotEnabled {
                workflow: self.name().to_string(),
                transition: transition.to_string(),
                state: from,
                reason,
            });
        }

        entity.set_state(self.name(), definition.to());

        let applied = AppliedTransition {
            workflow: self.name().to_string(),
            transition: transition.to_string(),
            from,
            to: definition.to().to_string(),
        };

        info!(
            workflow = %applied.workflow,
            transition = %applied.transition,
            from_state = %applied.from,
            to_state = %applied.to,
            "Workflow transition applied"
        );

        for registered in self.hooks.iter().filter(|h| {
            h.transition.as_deref().map_or(true, |name| name == transition)
        }) {
            if let Err(source) = registered.hook.on_transition(entity, &applied) {
                error!(
                    workflow = %applied.workflow,
                    transition = %applied.transition,
                    error = %source,
                    "Transition hook failed after state change"
                );
                return Err(WorkflowError::HookFailed { applied, source });
            }
        }

        Ok(applied)
    }

    /// Apply the same transition to many entities. Each entity succeeds or fails on its own.
    pub fn apply_all<'e, I>(&self, entities: I, transition: &str) -> Vec<Result<AppliedTransition, WorkflowError>>
    where
        I: IntoIterator<Item = &'e mut E>,
        E: 'e,
    {
        let results: Vec<_> = entities
            .into_iter()
            .map(|entity| self.apply(entity, transition))
            .collect();

        info!(
            workflow = %self.name(),
            transition = %transition,
            total = results.len(),
            succeeded = results.iter().filter(|r| r.is_ok()).count(),
            "Bulk transition finished"
        );

        results
    }

    fn transition(&self, name: &str) -> Result<&TransitionDefinition, WorkflowError> {
        self.definition
            .transition(name)
            .ok_or_else(|| WorkflowError::UnknownTransition {
                workflow: self.name().to_string(),
                transition: name.to_string(),
            })
    }

    fn blocker(&self, entity: &E, transition: &TransitionDefinition, state: &str) -> Option<BlockReason> {
        if !transition.starts_from(state) {
            return Some(BlockReason::NotInSourceState);
        }

        self.guards
            .get(transition.name())?
            .iter()
            .find(|registered| !registered.guard.allows(entity))
            .map(|registered| BlockReason::GuardRejected {
                guard: registered.name.clone(),
            })
    }
}

/// Attaches guards and hooks to a definition, checking every name against it
pub struct WorkflowBuilder<E> {
    definition: Arc<WorkflowDefinition>,
    named_guards: HashMap<String, Arc<dyn Guard<E>>>,
    guards: Vec<(String, Arc<dyn Guard<E>>)>,
    hooks: Vec<RegisteredHook<E>>,
}

impl<E: Stateful> WorkflowBuilder<E> {
    /// Provide the predicate for a guard name used in the definition
    pub fn named_guard(mut self, name: impl Into<String>, guard: impl Guard<E> + 'static) -> Self {
        self.named_guards.insert(name.into(), Arc::new(guard));
        self
    }

    /// Guard a transition directly. Several guards on one transition must all pass.
    pub fn guard(mut self, transition: impl Into<String>, guard: impl Guard<E> + 'static) -> Self {
        self.guards.push((transition.into(), Arc::new(guard)));
        self
    }

    /// Run `hook` after `transition` commits
    pub fn hook(mut self, transition: impl Into<String>, hook: impl TransitionHook<E> + 'static) -> Self {
        self.hooks.push(RegisteredHook {
            transition: Some(transition.into()),
            hook: Arc::new(hook),
        });
        self
    }

    /// Run `hook` after any transition of this workflow commits
    pub fn hook_all(mut self, hook: impl TransitionHook<E> + 'static) -> Self {
        self.hooks.push(RegisteredHook {
            transition: None,
            hook: Arc::new(hook),
        });
        self
    }

    pub fn build(self) -> Result<Workflow<E>, DefinitionError> {
        let workflow = self.definition.name().to_string();
        let mut guards: HashMap<String, Vec<RegisteredGuard<E>>> = HashMap::new();

        for transition in self.definition.transitions() {
            if let Some(name) = transition.guard() {
                let guard = self.named_guards.get(name).ok_or_else(|| {
                    DefinitionError::UnregisteredGuard {
                        workflow: workflow.clone(),
                        transition: transition.name().to_string(),
                        guard: name.to_string(),
                    }
                })?;
                guards
                    .entry(transition.name().to_string())
                    .or_default()
                    .push(RegisteredGuard {
                        name: Some(name.to_string()),
                        guard: Arc::clone(guard),
                    });
            }
        }

        for (transition, guard) in self.guards {
            if self.definition.transition(&transition).is_none() {
                return Err(DefinitionError::UnknownTransition {
                    workflow,
                    transition,
                });
            }
            guards
                .entry(transition)
                .or_default()
                .push(RegisteredGuard { name: None, guard });
        }

        for registered in &self.hooks {
            if let Some(transition) = &registered.transition {
                if self.definition.transition(transition).is_none() {
                    return Err(DefinitionError::UnknownTransition {
                        workflow,
                        transition: transition.clone(),
                    });
                }
            }
        }

        Ok(Workflow {
            definition: self.definition,
            guards,
            hooks: self.hooks,
        })
    }
}
