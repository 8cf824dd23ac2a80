//! Test builders for bundled resources. Each factory is a plain value:
//! configure it, then call `create()` to get the entity.

#![allow(dead_code)]

use resource_workflow::resources::{blog_post, pull_request, subscription};
use resource_workflow::{BlogPost, PullRequest, Subscription, Workflow};
use uuid::Uuid;

pub struct BlogPostFactory {
    title: Option<String>,
    current_place: String,
}

impl BlogPostFactory {
    pub fn new() -> Self {
        Self {
            title: None,
            current_place: blog_post::DRAFT.to_string(),
        }
    }

    pub fn on_draft(self) -> Self {
        self.with_current_place(blog_post::DRAFT)
    }

    pub fn reviewed(self) -> Self {
        self.with_current_place(blog_post::REVIEWED)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_current_place(mut self, place: &str) -> Self {
        self.current_place = place.to_string();
        self
    }

    pub fn create(self) -> BlogPost {
        BlogPost::restore(Uuid::new_v4(), self.title, self.current_place)
    }
}

pub struct PullRequestFactory {
    current_place: String,
}

impl PullRequestFactory {
    pub fn new() -> Self {
        Self {
            current_place: pull_request::START.to_string(),
        }
    }

    pub fn with_current_place(mut self, place: &str) -> Self {
        self.current_place = place.to_string();
        self
    }

    pub fn create(self) -> PullRequest {
        PullRequest::restore(Uuid::new_v4(), self.current_place)
    }
}

pub struct SubscriptionFactory {
    email: String,
    state: String,
}

impl SubscriptionFactory {
    pub fn new() -> Self {
        Self {
            email: "marty.mcfly@bttf.com".to_string(),
            state: subscription::NEW.to_string(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn accepted(mut self) -> Self {
        self.state = subscription::ACCEPTED.to_string();
        self
    }

    pub fn create(self) -> Subscription {
        Subscription::restore(Uuid::new_v4(), self.email, self.state)
    }
}

/// Six subscriptions, one of them already accepted
pub fn default_subscriptions_story() -> Vec<Subscription> {
    vec![
        SubscriptionFactory::new().with_email("marty.mcfly@bttf.com").create(),
        SubscriptionFactory::new().with_email("doc.brown@bttf.com").create(),
        SubscriptionFactory::new().with_email("biff.tannen@bttf.com").accepted().create(),
        SubscriptionFactory::new().with_email("lorraine.baines@bttf.com").create(),
        SubscriptionFactory::new().with_email("george.mcfly@bttf.com").create(),
        SubscriptionFactory::new().with_email("jennifer.parker@bttf.com").create(),
    ]
}

pub fn blog_post_workflow() -> Workflow<BlogPost> {
    Workflow::new(blog_post::definition().expect("blog_post definition")).expect("blog_post workflow")
}

pub fn pull_request_workflow() -> Workflow<PullRequest> {
    Workflow::new(pull_request::definition().expect("pull_request definition"))
        .expect("pull_request workflow")
}

pub fn subscription_workflow() -> Workflow<Subscription> {
    Workflow::new(subscription::definition().expect("subscription definition"))
        .expect("subscription workflow")
}
