//! Shared harness for the HTTP integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the wiring that the server binary performs lives here too, built on the
//! in-memory store. Suites seed state through the driving ports and exercise
//! the behaviour under test over HTTP.

use std::sync::Arc;

use actix_web::test::TestRequest;
use actix_web::web;
use serde_json::json;

use backend::domain::ports::{Engagement, ProjectAuthoring, ProjectModeration};
use backend::domain::{
    Amount, Category, EngagementService, ModerationAction, Project, ProjectDraft,
    ProjectLifecycleService, UserId,
};
use backend::inbound::http::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
use backend::inbound::http::state::HttpState;
use backend::outbound::MemoryStore;

/// In-memory backend wired the same way as the server binary.
pub struct TestBackend {
    pub state: web::Data<HttpState>,
}

impl TestBackend {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = Arc::new(ProjectLifecycleService::new(store.clone()));
        let engagement = Arc::new(EngagementService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        let authoring: Arc<dyn ProjectAuthoring> = lifecycle.clone();
        let moderation: Arc<dyn ProjectModeration> = lifecycle;
        let engagement: Arc<dyn Engagement> = engagement;
        Self {
            state: web::Data::new(HttpState::new(authoring, moderation, engagement)),
        }
    }

    /// Seed a pending project owned by `creator` through the authoring port.
    pub async fn seed_project(&self, creator: UserId) -> Project {
        self.state
            .authoring
            .create(creator, draft("Clean water for the valley"))
            .await
            .expect("seed project")
    }

    /// Seed a project and move it to `Approved`.
    pub async fn seed_approved_project(&self, creator: UserId) -> Project {
        let project = self.seed_project(creator).await;
        self.state
            .moderation
            .transition(project.id, ModerationAction::Approve)
            .await
            .expect("approve seeded project")
    }
}

/// A valid draft with the given title.
pub fn draft(title: &str) -> ProjectDraft {
    ProjectDraft::new(
        title,
        "A community fundraiser",
        Category::Health,
        "Springfield",
        Amount::new(50_000).expect("positive goal"),
        Vec::new(),
    )
    .expect("valid draft")
}

/// Attach the identity headers the upstream authenticator would set.
pub fn as_identity(req: TestRequest, user: UserId, role: &str) -> TestRequest {
    req.insert_header((USER_ID_HEADER, user.to_string()))
        .insert_header((USER_ROLE_HEADER, role.to_owned()))
}

/// A complete JSON body for submitting a project over HTTP.
pub fn create_payload(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "A community fundraiser",
        "category": "Health",
        "location": "Springfield",
        "goalAmount": 50_000,
    })
}
