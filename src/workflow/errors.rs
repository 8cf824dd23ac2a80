use thiserror::Error;

use super::engine::AppliedTransition;

/// Problems found while building a workflow. These are fatal: a workflow that
/// fails validation is never handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Workflow '{workflow}' declares no states")]
    NoStates { workflow: String },

    #[error("Workflow '{workflow}' declares state '{state}' more than once")]
    DuplicateState { workflow: String, state: String },

    #[error("Workflow '{workflow}' has initial state '{state}' which is not declared")]
    UnknownInitialState { workflow: String, state: String },

    #[error("Workflow '{workflow}' declares transition '{transition}' more than once")]
    DuplicateTransition { workflow: String, transition: String },

    #[error("Transition '{transition}' of workflow '{workflow}' has no source states")]
    EmptyFromSet { workflow: String, transition: String },

    #[error("Transition '{transition}' of workflow '{workflow}' starts from undeclared state '{state}'")]
    UnknownFromState {
        workflow: String,
        transition: String,
        state: String,
    },

    #[error("Transition '{transition}' of workflow '{workflow}' targets undeclared state '{state}'")]
    UnknownToState {
        workflow: String,
        transition: String,
        state: String,
    },

    #[error("Workflow '{workflow}' has no transition '{transition}' to attach to")]
    UnknownTransition { workflow: String, transition: String },

    #[error("Transition '{transition}' of workflow '{workflow}' names guard '{guard}' but none is registered")]
    UnregisteredGuard {
        workflow: String,
        transition: String,
        guard: String,
    },

    #[error("Workflow '{workflow}' is already registered")]
    DuplicateWorkflow { workflow: String },
}

/// Why a declared transition cannot fire right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The entity is not in any of the transition's source states
    NotInSourceState,
    /// A guard evaluated false. Carries the configured guard name when there is one.
    GuardRejected { guard: Option<String> },
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::NotInSourceState => write!(f, "not in a source state"),
            BlockReason::GuardRejected { guard: Some(guard) } => {
                write!(f, "blocked by guard '{guard}'")
            }
            BlockReason::GuardRejected { guard: None } => write!(f, "blocked by guard"),
        }
    }
}

/// Errors returned while querying or applying transitions
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Unknown workflow '{workflow}'")]
    UnknownWorkflow { workflow: String },

    #[error("Workflow '{workflow}' has no transition named '{transition}'")]
    UnknownTransition { workflow: String, transition: String },

    #[error("Transition '{transition}' of workflow '{workflow}' is not enabled from state '{state}': {reason}")]
    NotEnabled {
        workflow: String,
        transition: String,
        state: String,
        reason: BlockReason,
    },

    #[error("Entity is in state '{state}' which workflow '{workflow}' does not declare")]
    InvalidState { workflow: String, state: String },

    #[error("Entity carries no state for workflow '{workflow}'")]
    MissingState { workflow: String },

    /// The state change was committed before the hook ran; it is not rolled back.
    #[error("Transition '{}' of workflow '{}' was applied but a hook failed: {source}", applied.transition, applied.workflow)]
    HookFailed {
        applied: AppliedTransition,
        #[source]
        source: anyhow::Error,
    },
}

impl WorkflowError {
    /// Status code an HTTP layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            WorkflowError::NotEnabled { .. } => 400,
            WorkflowError::UnknownWorkflow { .. } | WorkflowError::UnknownTransition { .. } => 404,
            WorkflowError::InvalidState { .. }
            | WorkflowError::MissingState { .. }
            | WorkflowError::HookFailed { .. } => 500,
        }
    }

    /// True when the caller asked for something that does not exist or is not allowed now
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }

    /// The committed transition, for errors raised after the state already changed
    pub fn applied(&self) -> Option<&AppliedTransition> {
        match self {
            WorkflowError::HookFailed { applied, .. } => Some(applied),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_enabled_and_unknown_transition_are_distinct_client_errors() {
        let not_enabled = WorkflowError::NotEnabled {
            workflow: "blog_post".to_string(),
            transition: "publish".to_string(),
            state: "draft".to_string(),
            reason: BlockReason::NotInSourceState,
        };
        let unknown = WorkflowError::UnknownTransition {
            workflow: "blog_post".to_string(),
            transition: "nonexistent".to_string(),
        };

        assert_eq!(not_enabled.http_status(), 400);
        assert_eq!(unknown.http_status(), 404);
        assert!(not_enabled.is_client_error());
        assert!(unknown.is_client_error());
    }

    #[test]
    fn test_hook_failure_is_server_error_and_keeps_applied_record() {
        let applied = AppliedTransition {
            workflow: "subscription".to_string(),
            transition: "accept".to_string(),
            from: "new".to_string(),
            to: "accepted".to_string(),
        };
        let error = WorkflowError::HookFailed {
            applied: applied.clone(),
            source: anyhow::anyhow!("mailer unavailable"),
        };

        assert_eq!(error.http_status(), 500);
        assert!(!error.is_client_error());
        assert_eq!(error.applied(), Some(&applied));
        assert!(error.to_string().contains("mailer unavailable"));
    }

    #[test]
    fn test_block_reason_display() {
        let reason = BlockReason::GuardRejected {
            guard: Some("has_title".to_string()),
        };
        assert_eq!(reason.to_string(), "blocked by guard 'has_title'");
        assert_eq!(BlockReason::NotInSourceState.to_string(), "not in a source state");
    }
}
