// Finite-state workflows for entity lifecycles.
// Definitions are validated once at startup; entities only move through declared transitions.

pub mod definition;
pub mod engine;
pub mod errors;
pub mod history;
pub mod marking;
pub mod registry;

pub use definition::{TransitionDefinition, WorkflowDefinition, WorkflowDefinitionBuilder};
pub use engine::{Action, AppliedTransition, Guard, TransitionHook, Workflow, WorkflowBuilder};
pub use errors::{BlockReason, DefinitionError, WorkflowError};
pub use history::{TransitionHistory, TransitionRecord};
pub use marking::{Marking, Stateful};
pub use registry::WorkflowRegistry;
