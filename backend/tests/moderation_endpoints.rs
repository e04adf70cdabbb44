//! HTTP integration tests for the moderation surface.

// Shared helpers include functions used only by other integration suites.
#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;

use backend::domain::{ProjectId, UserId};
use backend::inbound::http;
use backend::inbound::http::health::HealthState;

use support::{as_identity, TestBackend};

macro_rules! init_app {
    ($backend:expr) => {
        test::init_service(
            App::new()
                .app_data($backend.state.clone())
                .app_data(web::Data::new(HealthState::new()))
                .configure(http::configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn pending_queue_lists_submitted_projects() {
    let backend = TestBackend::new();
    backend.seed_project(UserId::random()).await;
    backend.seed_project(UserId::random()).await;
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::get().uri("/api/v1/moderator/projects/pending"),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    // The listing echoes the lowercase path segment, not the stored form.
    assert_eq!(body["status"], "pending");
    assert_eq!(body["count"], 2);
}

#[actix_rt::test]
async fn an_empty_status_queue_is_not_found() {
    let backend = TestBackend::new();
    backend.seed_project(UserId::random()).await;
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::get().uri("/api/v1/moderator/projects/approved"),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No approved projects found");
}

#[actix_rt::test]
async fn an_unknown_status_segment_is_a_bad_request() {
    let backend = TestBackend::new();
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::get().uri("/api/v1/moderator/projects/archived"),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid action parameter");
}

#[actix_rt::test]
async fn approving_moves_the_project_and_reports_the_new_status() {
    let backend = TestBackend::new();
    let project = backend.seed_project(UserId::random()).await;
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::put().uri(&format!(
            "/api/v1/moderator/projects/{}/approve",
            project.id
        )),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Project approved successfully");
    assert_eq!(body["project"]["status"], "Approved");
    assert_eq!(body["project"]["version"], 2);
}

#[actix_rt::test]
async fn a_rejected_project_can_be_reapproved() {
    let backend = TestBackend::new();
    let project = backend.seed_project(UserId::random()).await;
    let app = init_app!(backend);

    for action in ["reject", "approve"] {
        let req = as_identity(
            test::TestRequest::put().uri(&format!(
                "/api/v1/moderator/projects/{}/{action}",
                project.id
            )),
            UserId::random(),
            "moderator",
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = as_identity(
        test::TestRequest::get().uri("/api/v1/moderator/projects/approved"),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
}

#[actix_rt::test]
async fn an_unknown_action_segment_is_a_bad_request() {
    let backend = TestBackend::new();
    let project = backend.seed_project(UserId::random()).await;
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::put().uri(&format!(
            "/api/v1/moderator/projects/{}/promote",
            project.id
        )),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid action parameter");
}

#[actix_rt::test]
async fn transitioning_an_unknown_project_is_not_found() {
    let backend = TestBackend::new();
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::put().uri(&format!(
            "/api/v1/moderator/projects/{}/approve",
            ProjectId::random()
        )),
        UserId::random(),
        "moderator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn moderation_requires_the_moderator_role() {
    let backend = TestBackend::new();
    let app = init_app!(backend);

    let req = as_identity(
        test::TestRequest::get().uri("/api/v1/moderator/projects/pending"),
        UserId::random(),
        "creator",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["capability"], "moderate_projects");
}
