use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::{DefinitionError, Stateful, TransitionDefinition, WorkflowDefinition};

pub const WORKFLOW: &str = "subscription";

pub const NEW: &str = "new";
pub const ACCEPTED: &str = "accepted";
pub const REJECTED: &str = "rejected";

pub fn definition() -> Result<WorkflowDefinition, DefinitionError> {
    WorkflowDefinition::builder(WORKFLOW)
        .states([NEW, ACCEPTED, REJECTED])
        .add_transition(TransitionDefinition::new("accept", [NEW], ACCEPTED).with_label("Accept"))
        .add_transition(TransitionDefinition::new("reject", [NEW], REJECTED).with_label("Reject"))
        .build()
}

/// Newsletter subscription awaiting moderation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub email: String,
    state: String,
}

impl Subscription {
    pub fn new(email: impl Into<String>) -> Self {
        Self::restore(Uuid::new_v4(), email, NEW)
    }

    pub fn restore(id: Uuid, email: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            state: state.into(),
        }
    }

    pub fn current_state(&self) -> &str {
        &self.state
    }
}

impl Stateful for Subscription {
    fn state(&self, workflow: &str) -> Option<&str> {
        (workflow == WORKFLOW).then_some(self.state.as_str())
    }

    fn set_state(&mut self, workflow: &str, state: &str) {
        if workflow == WORKFLOW {
            self.state = state.to_string();
        }
    }
}
