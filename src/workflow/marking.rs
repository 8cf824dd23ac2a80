use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An entity whose lifecycle is driven by one or more named workflows.
///
/// The engine reads the current state through [`Stateful::state`] and writes it
/// only through [`Stateful::set_state`] once a transition has been accepted.
/// Entities governed by a single workflow return `None` for any other name.
pub trait Stateful {
    fn state(&self, workflow: &str) -> Option<&str>;
    fn set_state(&mut self, workflow: &str, state: &str);
}

/// Current state per workflow, for entities that carry several lifecycles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marking(BTreeMap<String, String>);

impl Marking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, workflow: impl Into<String>, state: impl Into<String>) -> Self {
        self.0.insert(workflow.into(), state.into());
        self
    }

    pub fn get(&self, workflow: &str) -> Option<&str> {
        self.0.get(workflow).map(String::as_str)
    }

    pub fn workflows(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Stateful for Marking {
    fn state(&self, workflow: &str) -> Option<&str> {
        self.get(workflow)
    }

    fn set_state(&mut self, workflow: &str, state: &str) {
        self.0.insert(workflow.to_string(), state.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marking_tracks_each_workflow_separately() {
        let mut marking = Marking::new()
            .with("blog_post", "draft")
            .with("publication", "scheduled");

        marking.set_state("blog_post", "reviewed");

        assert_eq!(marking.state("blog_post"), Some("reviewed"));
        assert_eq!(marking.state("publication"), Some("scheduled"));
        assert_eq!(marking.state("pull_request"), None);
        assert_eq!(marking.workflows().collect::<Vec<_>>(), vec!["blog_post", "publication"]);
    }

    #[test]
    fn test_marking_serializes_as_plain_map() {
        let marking = Marking::new().with("subscription", "accepted");
        let json = serde_json::to_string(&marking).unwrap();
        assert_eq!(json, r#"{"subscription":"accepted"}"#);
    }
}
