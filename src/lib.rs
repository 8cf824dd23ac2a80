// Resource Workflow Library - lifecycle state machines for persisted resources
// This exposes the engine, configuration and bundled resources for applications and tests

pub mod config;
pub mod resources;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{ConfigError, EngineConfig, ObservabilityConfig, TransitionConfig, WorkflowConfig};
pub use resources::{builtin_definitions, BlogPost, PullRequest, Subscription};
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    Action,
    AppliedTransition,
    BlockReason,
    DefinitionError,
    Guard,
    Marking,
    Stateful,
    TransitionDefinition,
    TransitionHistory,
    TransitionHook,
    TransitionRecord,
    Workflow,
    WorkflowDefinition,
    WorkflowError,
    WorkflowRegistry,
};
