use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::{DefinitionError, Stateful, WorkflowDefinition};

pub const WORKFLOW: &str = "pull_request";

pub const START: &str = "start";
pub const CODING: &str = "coding";
pub const TEST: &str = "test";
pub const REVIEW: &str = "review";
pub const MERGED: &str = "merged";
pub const CLOSED: &str = "closed";

pub const PLACES: [&str; 6] = [START, CODING, TEST, REVIEW, MERGED, CLOSED];

pub fn definition() -> Result<WorkflowDefinition, DefinitionError> {
    WorkflowDefinition::builder(WORKFLOW)
        .states(PLACES)
        .initial(START)
        .transition("submit", [START], TEST)
        .transition("update", [CODING, TEST, REVIEW], TEST)
        .transition("wait_for_review", [TEST], REVIEW)
        .transition("request_change", [REVIEW], CODING)
        .transition("accept", [REVIEW], MERGED)
        .transition("reject", [REVIEW], CLOSED)
        .transition("reopen", [CLOSED], REVIEW)
        .build()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: Uuid,
    current_place: String,
}

impl PullRequest {
    pub fn new() -> Self {
        Self::restore(Uuid::new_v4(), START)
    }

    pub fn restore(id: Uuid, current_place: impl Into<String>) -> Self {
        Self {
            id,
            current_place: current_place.into(),
        }
    }

    pub fn current_place(&self) -> &str {
        &self.current_place
    }
}

impl Default for PullRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl Stateful for PullRequest {
    fn state(&self, workflow: &str) -> Option<&str> {
        (workflow == WORKFLOW).then_some(self.current_place.as_str())
    }

    fn set_state(&mut self, workflow: &str, state: &str) {
        if workflow == WORKFLOW {
            self.current_place = state.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_is_the_only_terminal_place() {
        let definition = definition().unwrap();
        assert_eq!(definition.terminal_states(), vec![MERGED]);
    }

    #[test]
    fn test_update_is_available_from_every_working_place() {
        let definition = definition().unwrap();
        let update = definition.transition("update").unwrap();

        for place in [CODING, TEST, REVIEW] {
            assert!(update.starts_from(place), "update should leave {place}");
        }
        assert!(!update.starts_from(START));
    }
}
