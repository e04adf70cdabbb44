//! Donor engagement handlers.
//!
//! ```text
//! POST /api/v1/user/projects/{id}/follow
//! POST /api/v1/user/projects/{id}/donate
//! GET  /api/v1/user/donations/history
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Amount, Capability, Error, ProjectId};

use super::auth::AuthContext;
use super::error::{ApiError, ApiResult};
use super::responses::{DonationEnvelope, DonationListResponse, ProjectEnvelope};
use super::state::HttpState;
use super::validation::require;

/// Request payload for donating to a project.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonateRequest {
    pub amount: Option<i64>,
    /// Reference from the payment collaborator; a mock value stands in when
    /// the payment flow is stubbed out.
    pub payment_ref: Option<String>,
}

/// Follow an approved project.
#[utoipa::path(
    post,
    path = "/api/v1/user/projects/{id}/follow",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project followed", body = ProjectEnvelope),
        (status = 404, description = "Unknown or unapproved project", body = ApiError),
        (status = 409, description = "Already following", body = ApiError)
    ),
    tags = ["user"],
    operation_id = "followProject"
)]
#[post("/user/projects/{id}/follow")]
pub async fn follow_project(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = ctx.authorize(Capability::FollowProject)?;
    let id = ProjectId::parse(&path.into_inner())?;
    let project = state.engagement.follow(id, user).await?;
    Ok(HttpResponse::Ok().json(ProjectEnvelope {
        message: "Project followed successfully".to_owned(),
        project,
    }))
}

/// Donate to an approved project.
///
/// The donation record and the raised-amount increment land atomically; the
/// response carries both the record and the project as it stood after the
/// increment.
#[utoipa::path(
    post,
    path = "/api/v1/user/projects/{id}/donate",
    params(("id" = String, Path, description = "Project identifier")),
    request_body = DonateRequest,
    responses(
        (status = 201, description = "Donation recorded", body = DonationEnvelope),
        (status = 400, description = "Invalid donation amount", body = ApiError),
        (status = 404, description = "Unknown or unapproved project", body = ApiError)
    ),
    tags = ["user"],
    operation_id = "donateToProject"
)]
#[post("/user/projects/{id}/donate")]
pub async fn donate(
    state: web::Data<HttpState>,
    ctx: AuthContext,
    path: web::Path<String>,
    payload: web::Json<DonateRequest>,
) -> ApiResult<HttpResponse> {
    let donor = ctx.authorize(Capability::Donate)?;
    let id = ProjectId::parse(&path.into_inner())?;
    let body = payload.into_inner();
    let amount = Amount::new(require(body.amount, "amount")?).map_err(|_| {
        Error::invalid_request("Invalid donation amount")
            .with_details(serde_json::json!({ "field": "amount", "code": "non_positive" }))
    })?;
    let payment_ref = body
        .payment_ref
        .unwrap_or_else(|| "mock_payment_id".to_owned());
    let receipt = state
        .engagement
        .donate(id, donor, amount, payment_ref)
        .await?;
    Ok(HttpResponse::Created().json(DonationEnvelope {
        message: format!("Donated {} successfully", receipt.donation.amount),
        donation: receipt.donation,
        project: receipt.project,
    }))
}

/// The requester's donation history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/user/donations/history",
    responses(
        (status = 200, description = "Donation history", body = DonationListResponse),
        (status = 401, description = "Missing identity", body = ApiError),
        (status = 403, description = "Role lacks the capability", body = ApiError)
    ),
    tags = ["user"],
    operation_id = "donationHistory"
)]
#[get("/user/donations/history")]
pub async fn donation_history(
    state: web::Data<HttpState>,
    ctx: AuthContext,
) -> ApiResult<HttpResponse> {
    let donor = ctx.authorize(Capability::ViewDonationHistory)?;
    let donations = state.engagement.donation_history(donor).await?;
    Ok(HttpResponse::Ok().json(DonationListResponse {
        count: donations.len(),
        donations,
    }))
}
