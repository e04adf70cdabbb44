//! Driving port for creator-facing project authoring.

use async_trait::async_trait;

use crate::domain::project::{ImageRef, Project, ProjectDraft, ProjectId, ProjectPatch};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Use-cases available to the creator role.
///
/// Ownership failures and genuine absence are deliberately conflated into
/// `NotFound` so the API never leaks whether somebody else's project exists.
#[async_trait]
pub trait ProjectAuthoring: Send + Sync {
    /// Submit a new project. The result is always `Pending` with nothing
    /// raised.
    async fn create(&self, creator: UserId, draft: ProjectDraft) -> Result<Project, Error>;

    /// Merge a partial update into a project still awaiting moderation.
    ///
    /// Fails with `NotFound` unless the project exists and is owned by the
    /// requester, and with `InvalidState` once the project has left
    /// `Pending`.
    async fn update(
        &self,
        project: ProjectId,
        requester: UserId,
        patch: ProjectPatch,
    ) -> Result<Project, Error>;

    /// Append a milestone with a server-assigned timestamp.
    async fn add_milestone(
        &self,
        project: ProjectId,
        requester: UserId,
        text: String,
        image: Option<ImageRef>,
    ) -> Result<Project, Error>;

    /// List the requester's projects, newest first. May be empty.
    async fn list_for_creator(&self, creator: UserId) -> Result<Vec<Project>, Error>;

    /// Fetch one project owned by the requester.
    async fn fetch_for_creator(
        &self,
        project: ProjectId,
        requester: UserId,
    ) -> Result<Project, Error>;
}
