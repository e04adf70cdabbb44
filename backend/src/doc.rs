//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! handler path in the inbound layer, the domain and envelope schemas they
//! reference, and the identity-header security scheme. Swagger UI serves the
//! document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Category, Donation, DonationId, ErrorCode, Milestone, ModerationAction, Project, ProjectStatus,
    Role, User,
};
use crate::inbound::http::creator::{CreateProjectRequest, MilestoneRequest, UpdateProjectRequest};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::responses::{
    DonationEnvelope, DonationListResponse, ProjectDetailResponse, ProjectEnvelope,
    ProjectListResponse, StatusListResponse,
};
use crate::inbound::http::users::DonateRequest;

/// Enrich the generated document with the identity-header security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "IdentityHeaders",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-user-id",
                "Caller identity forwarded by the authenticating gateway; \
                 paired with x-user-role.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Crowdfunding backend API",
        description = "HTTP interface for project authoring, moderation, and donor engagement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("IdentityHeaders" = [])),
    paths(
        crate::inbound::http::creator::create_project,
        crate::inbound::http::creator::list_projects,
        crate::inbound::http::creator::fetch_project,
        crate::inbound::http::creator::update_project,
        crate::inbound::http::creator::add_milestone,
        crate::inbound::http::moderator::list_by_status,
        crate::inbound::http::moderator::transition_project,
        crate::inbound::http::users::follow_project,
        crate::inbound::http::users::donate,
        crate::inbound::http::users::donation_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        Project,
        ProjectStatus,
        ModerationAction,
        Category,
        Milestone,
        Donation,
        DonationId,
        Role,
        User,
        CreateProjectRequest,
        UpdateProjectRequest,
        MilestoneRequest,
        DonateRequest,
        ProjectEnvelope,
        ProjectDetailResponse,
        ProjectListResponse,
        StatusListResponse,
        DonationEnvelope,
        DonationListResponse,
    )),
    tags(
        (name = "creator", description = "Project authoring by creators"),
        (name = "moderator", description = "Moderation queue and lifecycle transitions"),
        (name = "user", description = "Following and donating"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
