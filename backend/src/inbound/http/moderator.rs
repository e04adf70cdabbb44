//! Moderation surface handlers.
//!
//! ```text
//! GET /api/v1/moderator/projects/{status}
//! PUT /api/v1/moderator/projects/{id}/{action}
//! ```

use actix_web::{get, put, web, HttpResponse};

use crate::domain::{Capability, ProjectId};

use super::auth::AuthContext;
use super::error::{ApiError, ApiResult};
use super::responses::{ProjectEnvelope, StatusListResponse};
use super::state::HttpState;
use super::validation::{parse_action_segment, parse_status_segment};

/// List every project in the given status.
///
/// An empty result is a 404, not an empty array; the moderation queue
/// clients rely on the distinction.
#[utoipa::path(
    get,
    path = "/api/v1/moderator/projects/{status}",
    params(("status" = String, Path, description = "pending | approved | rejected | blacklisted")),
    responses(
        (status = 200, description = "Projects in the requested status", body = StatusListResponse),
        (status = 400, description = "Unknown status segment", body = ApiError),
        (status = 403, description = "Role lacks the capability", body = ApiError),
        (status = 404, description = "No projects in this status", body = ApiError)
    ),
    tags = ["moderator"],
    operation_id = "listProjectsByStatus"
)]
#[get("/moderator/projects/{status}")]
pub async fn list_by_status(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    ctx.authorize(Capability::ModerateProjects)?;
    let status = parse_status_segment(&path.into_inner())?;
    let projects = state.moderation.list_by_status(status).await?;
    Ok(HttpResponse::Ok().json(StatusListResponse {
        status,
        count: projects.len(),
        projects,
    }))
}

/// Move a project to the action's target status.
#[utoipa::path(
    put,
    path = "/api/v1/moderator/projects/{id}/{action}",
    params(
        ("id" = String, Path, description = "Project identifier"),
        ("action" = String, Path, description = "approve | reject | blacklist")
    ),
    responses(
        (status = 200, description = "Project moved to the target status", body = ProjectEnvelope),
        (status = 400, description = "Unknown action segment", body = ApiError),
        (status = 403, description = "Role lacks the capability", body = ApiError),
        (status = 404, description = "Unknown project", body = ApiError)
    ),
    tags = ["moderator"],
    operation_id = "transitionProject"
)]
#[put("/moderator/projects/{id}/{action}")]
pub async fn transition_project(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    ctx.authorize(Capability::ModerateProjects)?;
    let (id, action) = path.into_inner();
    let id = ProjectId::parse(&id)?;
    let action = parse_action_segment(&action)?;
    let project = state.moderation.transition(id, action).await?;
    let message = format!("Project {} successfully", project.status);
    Ok(HttpResponse::Ok().json(ProjectEnvelope { message, project }))
}
