//! Project lifecycle domain service.
//!
//! Implements the authoring and moderation driving ports over a project
//! repository. Each operation fetches the record fresh, mutates it, and
//! saves with an optimistic-concurrency check; there is no in-process
//! caching across calls.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use super::ports::{
    ProjectAuthoring, ProjectModeration, ProjectRepository, ProjectStoreError,
};
use super::project::{
    ImageRef, Milestone, ModerationAction, Project, ProjectDraft, ProjectId, ProjectPatch,
    ProjectStatus,
};
use super::user::UserId;
use super::Error;

/// Domain service enforcing the project lifecycle rules.
#[derive(Clone)]
pub struct ProjectLifecycleService<R> {
    projects: Arc<R>,
}

impl<R> ProjectLifecycleService<R> {
    /// Create a new service over the given repository.
    pub fn new(projects: Arc<R>) -> Self {
        Self { projects }
    }
}

impl<R> ProjectLifecycleService<R>
where
    R: ProjectRepository,
{
    fn map_store_error(error: ProjectStoreError) -> Error {
        match error {
            ProjectStoreError::Storage { message } => {
                Error::internal(format!("project store error: {message}"))
            }
            ProjectStoreError::VersionMismatch { expected, actual } => {
                Error::conflict("project was modified concurrently").with_details(json!({
                    "expectedVersion": expected,
                    "actualVersion": actual,
                    "code": "version_mismatch",
                }))
            }
        }
    }

    fn not_found() -> Error {
        Error::not_found("Project not found")
    }

    /// Fetch a project owned by `requester`. Absence and ownership mismatch
    /// produce the same `NotFound` so existence never leaks to non-owners.
    async fn fetch_owned(
        &self,
        project: ProjectId,
        requester: UserId,
    ) -> Result<Project, Error> {
        let found = self
            .projects
            .find_by_id(&project)
            .await
            .map_err(Self::map_store_error)?;
        match found {
            Some(record) if record.creator == requester => Ok(record),
            _ => Err(Self::not_found()),
        }
    }
}

#[async_trait]
impl<R> ProjectAuthoring for ProjectLifecycleService<R>
where
    R: ProjectRepository,
{
    async fn create(&self, creator: UserId, draft: ProjectDraft) -> Result<Project, Error> {
        let project = Project::create(creator, draft, Utc::now());
        self.projects
            .save(&project, None)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(project = %project.id, %creator, "project submitted for moderation");
        Ok(project)
    }

    async fn update(
        &self,
        project: ProjectId,
        requester: UserId,
        patch: ProjectPatch,
    ) -> Result<Project, Error> {
        let mut record = self.fetch_owned(project, requester).await?;
        if !record.is_editable() {
            return Err(
                Error::invalid_state("Cannot edit project after approval/rejection").with_details(
                    json!({ "status": record.status, "code": "not_pending" }),
                ),
            );
        }
        let expected = record.version;
        record.apply_patch(patch, Utc::now())?;
        self.projects
            .save(&record, Some(expected))
            .await
            .map_err(Self::map_store_error)?;
        Ok(record)
    }

    async fn add_milestone(
        &self,
        project: ProjectId,
        requester: UserId,
        text: String,
        image: Option<ImageRef>,
    ) -> Result<Project, Error> {
        let mut record = self.fetch_owned(project, requester).await?;
        let milestone = Milestone::new(text, image, Utc::now())?;
        let expected = record.version;
        let now = milestone.created_at;
        record.add_milestone(milestone, now);
        self.projects
            .save(&record, Some(expected))
            .await
            .map_err(Self::map_store_error)?;
        Ok(record)
    }

    async fn list_for_creator(&self, creator: UserId) -> Result<Vec<Project>, Error> {
        let mut projects = self
            .projects
            .find_by_creator(&creator)
            .await
            .map_err(Self::map_store_error)?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn fetch_for_creator(
        &self,
        project: ProjectId,
        requester: UserId,
    ) -> Result<Project, Error> {
        self.fetch_owned(project, requester).await
    }
}

#[async_trait]
impl<R> ProjectModeration for ProjectLifecycleService<R>
where
    R: ProjectRepository,
{
    async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, Error> {
        let mut projects = self
            .projects
            .find_by_status(status)
            .await
            .map_err(Self::map_store_error)?;
        if projects.is_empty() {
            // Empty results are a not-found condition on this surface, not
            // an empty list; callers handle it explicitly.
            return Err(Error::not_found(format!("No {status} projects found")));
        }
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn transition(
        &self,
        project: ProjectId,
        action: ModerationAction,
    ) -> Result<Project, Error> {
        let mut record = self
            .projects
            .find_by_id(&project)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(Self::not_found)?;
        let expected = record.version;
        let status = record.apply_transition(action, Utc::now());
        self.projects
            .save(&record, Some(expected))
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(project = %record.id, %action, %status, "project moderated");
        Ok(record)
    }
}
