use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::{DefinitionError, Stateful, TransitionDefinition, WorkflowDefinition};

pub const WORKFLOW: &str = "blog_post";

pub const DRAFT: &str = "draft";
pub const REVIEWED: &str = "reviewed";
pub const REJECTED: &str = "rejected";
pub const PUBLISHED: &str = "published";

/// Editorial lifecycle of a blog post
pub fn definition() -> Result<WorkflowDefinition, DefinitionError> {
    WorkflowDefinition::builder(WORKFLOW)
        .states([DRAFT, REVIEWED, REJECTED, PUBLISHED])
        .initial(DRAFT)
        .add_transition(TransitionDefinition::new("to_review", [DRAFT], REVIEWED).with_label("Request review"))
        .add_transition(TransitionDefinition::new("publish", [REVIEWED], PUBLISHED).with_label("Publish"))
        .add_transition(TransitionDefinition::new("reject", [REVIEWED], DRAFT).with_label("Reject"))
        .build()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: Option<String>,
    current_place: String,
}

impl BlogPost {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: None,
            current_place: DRAFT.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Rebuild a post loaded from storage. The engine rejects unknown places on first use.
    pub fn restore(id: Uuid, title: Option<String>, current_place: impl Into<String>) -> Self {
        Self {
            id,
            title,
            current_place: current_place.into(),
        }
    }

    pub fn current_place(&self) -> &str {
        &self.current_place
    }
}

impl Default for BlogPost {
    fn default() -> Self {
        Self::new()
    }
}

impl Stateful for BlogPost {
    fn state(&self, workflow: &str) -> Option<&str> {
        (workflow == WORKFLOW).then_some(self.current_place.as_str())
    }

    fn set_state(&mut self, workflow: &str, state: &str) {
        if workflow == WORKFLOW {
            self.current_place = state.to_string();
        }
    }
}
