//! Creator-facing project authoring handlers.
//!
//! ```text
//! POST /api/v1/creator/projects
//! GET  /api/v1/creator/projects
//! GET  /api/v1/creator/projects/{id}
//! PUT  /api/v1/creator/projects/{id}
//! POST /api/v1/creator/projects/{id}/milestones
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    Amount, Capability, Error, ImageRef, ProjectDraft, ProjectId, ProjectPatch,
    ProjectValidationError,
};

use super::auth::AuthContext;
use super::error::{ApiError, ApiResult};
use super::responses::{ProjectDetailResponse, ProjectEnvelope, ProjectListResponse};
use super::state::HttpState;
use super::validation::{parse_category, parse_image_refs, require};

/// Request payload for submitting a project.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub goal_amount: Option<i64>,
    /// References issued by the file storage collaborator.
    pub images: Option<Vec<String>>,
}

/// Request payload for a partial update of a pending project.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub goal_amount: Option<i64>,
}

/// Request payload for appending a milestone.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRequest {
    pub text: Option<String>,
    /// Reference issued by the file storage collaborator.
    pub image: Option<String>,
}

fn parse_goal(value: i64) -> Result<Amount, Error> {
    Amount::new(value).map_err(|_| ProjectValidationError::NonPositiveGoal.into())
}

fn parse_draft(body: CreateProjectRequest) -> Result<ProjectDraft, Error> {
    let title = require(body.title, "title")?;
    let description = require(body.description, "description")?;
    let category = parse_category(&require(body.category, "category")?)?;
    let location = require(body.location, "location")?;
    let goal_amount = parse_goal(require(body.goal_amount, "goalAmount")?)?;
    let images = parse_image_refs(body.images.unwrap_or_default())?;
    ProjectDraft::new(title, description, category, location, goal_amount, images)
        .map_err(Error::from)
}

fn parse_patch(body: UpdateProjectRequest) -> Result<ProjectPatch, Error> {
    let category = body.category.as_deref().map(parse_category).transpose()?;
    let goal_amount = body.goal_amount.map(parse_goal).transpose()?;
    Ok(ProjectPatch {
        title: body.title,
        description: body.description,
        category,
        location: body.location,
        goal_amount,
    })
}

/// Submit a new project for moderation.
#[utoipa::path(
    post,
    path = "/api/v1/creator/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project submitted, pending approval", body = ProjectEnvelope),
        (status = 400, description = "Missing or invalid fields", body = ApiError),
        (status = 401, description = "Missing identity", body = ApiError),
        (status = 403, description = "Role lacks the capability", body = ApiError)
    ),
    tags = ["creator"],
    operation_id = "createProject"
)]
#[post("/creator/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let creator = ctx.authorize(Capability::SubmitProject)?;
    let draft = parse_draft(payload.into_inner())?;
    let project = state.authoring.create(creator, draft).await?;
    Ok(HttpResponse::Created().json(ProjectEnvelope {
        message: "Project submitted successfully, pending approval".to_owned(),
        project,
    }))
}

/// List the requester's own projects, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/creator/projects",
    responses(
        (status = 200, description = "The requester's projects", body = ProjectListResponse),
        (status = 401, description = "Missing identity", body = ApiError),
        (status = 403, description = "Role lacks the capability", body = ApiError)
    ),
    tags = ["creator"],
    operation_id = "listCreatorProjects"
)]
#[get("/creator/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    ctx: AuthContext,
) -> ApiResult<HttpResponse> {
    let creator = ctx.authorize(Capability::EditOwnProject)?;
    let projects = state.authoring.list_for_creator(creator).await?;
    Ok(HttpResponse::Ok().json(ProjectListResponse {
        count: projects.len(),
        projects,
    }))
}

/// Fetch one of the requester's projects.
#[utoipa::path(
    get,
    path = "/api/v1/creator/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "The project", body = ProjectDetailResponse),
        (status = 404, description = "Unknown or not owned", body = ApiError)
    ),
    tags = ["creator"],
    operation_id = "getCreatorProject"
)]
#[get("/creator/projects/{id}")]
pub async fn fetch_project(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester = ctx.authorize(Capability::EditOwnProject)?;
    let id = ProjectId::parse(&path.into_inner())?;
    let project = state.authoring.fetch_for_creator(id, requester).await?;
    Ok(HttpResponse::Ok().json(ProjectDetailResponse { project }))
}

/// Merge a partial update into a pending project.
#[utoipa::path(
    put,
    path = "/api/v1/creator/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectEnvelope),
        (status = 404, description = "Unknown or not owned", body = ApiError),
        (status = 409, description = "Project already moderated", body = ApiError)
    ),
    tags = ["creator"],
    operation_id = "updateProject"
)]
#[put("/creator/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let requester = ctx.authorize(Capability::EditOwnProject)?;
    let id = ProjectId::parse(&path.into_inner())?;
    let patch = parse_patch(payload.into_inner())?;
    let project = state.authoring.update(id, requester, patch).await?;
    Ok(HttpResponse::Ok().json(ProjectEnvelope {
        message: "Project updated successfully".to_owned(),
        project,
    }))
}

/// Append a milestone to one of the requester's projects.
#[utoipa::path(
    post,
    path = "/api/v1/creator/projects/{id}/milestones",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = MilestoneRequest,
    responses(
        (status = 201, description = "Milestone added", body = ProjectEnvelope),
        (status = 400, description = "Missing milestone text", body = ApiError),
        (status = 404, description = "Unknown or not owned", body = ApiError)
    ),
    tags = ["creator"],
    operation_id = "addMilestone"
)]
#[post("/creator/projects/{id}/milestones")]
pub async fn add_milestone(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
    payload: web::Json<MilestoneRequest>,
) -> ApiResult<HttpResponse> {
    let requester = ctx.authorize(Capability::EditOwnProject)?;
    let id = ProjectId::parse(&path.into_inner())?;
    let body = payload.into_inner();
    let text = require(body.text, "text")?;
    let image = body
        .image
        .map(|value| ImageRef::new(value).map_err(Error::from))
        .transpose()?;
    let project = state
        .authoring
        .add_milestone(id, requester, text, image)
        .await?;
    Ok(HttpResponse::Created().json(ProjectEnvelope {
        message: "Milestone added".to_owned(),
        project,
    }))
}
