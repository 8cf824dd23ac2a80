// Resources whose lifecycles ship with the crate

pub mod blog_post;
pub mod pull_request;
pub mod subscription;

pub use blog_post::BlogPost;
pub use pull_request::PullRequest;
pub use subscription::Subscription;

use crate::workflow::{DefinitionError, WorkflowDefinition};

/// Definitions for every bundled resource, sorted by workflow name
pub fn builtin_definitions() -> Result<Vec<WorkflowDefinition>, DefinitionError> {
    Ok(vec![
        blog_post::definition()?,
        pull_request::definition()?,
        subscription::definition()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_definitions_are_valid() {
        let names: Vec<_> = builtin_definitions()
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();

        assert_eq!(names, vec!["blog_post", "pull_request", "subscription"]);
    }
}
