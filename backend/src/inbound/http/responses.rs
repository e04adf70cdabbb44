//! Shared response envelopes for the HTTP surface.

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::domain::{Donation, Project, ProjectStatus};

/// A project wrapped with a human-readable outcome message.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEnvelope {
    pub message: String,
    pub project: Project,
}

/// Single-project payload for the creator detail view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    pub project: Project,
}

/// Project listing with its count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub count: usize,
    pub projects: Vec<Project>,
}

fn status_label<S>(status: &ProjectStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(status.label())
}

/// Moderation listing annotated with the requested status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusListResponse {
    /// Echoes the lowercase path segment, not the stored variant form.
    #[serde(serialize_with = "status_label")]
    #[schema(value_type = String, example = "pending")]
    pub status: ProjectStatus,
    pub count: usize,
    pub projects: Vec<Project>,
}

/// Donation outcome: the record plus the project after the increment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationEnvelope {
    pub message: String,
    pub donation: Donation,
    pub project: Project,
}

/// Donation history listing with its count.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationListResponse {
    pub count: usize,
    pub donations: Vec<Donation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_listing_echoes_the_lowercase_segment() {
        let response = StatusListResponse {
            status: ProjectStatus::Pending,
            count: 0,
            projects: Vec::new(),
        };
        let value = serde_json::to_value(&response).expect("serialise");
        assert_eq!(value["status"], "pending");
    }
}
