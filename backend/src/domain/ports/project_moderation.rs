//! Driving port for the moderation surface.

use async_trait::async_trait;

use crate::domain::project::{ModerationAction, Project, ProjectId, ProjectStatus};
use crate::domain::Error;

/// Use-cases available to the moderator role.
#[async_trait]
pub trait ProjectModeration: Send + Sync {
    /// List every project in the given status.
    ///
    /// An empty result is signalled as `NotFound`, not an empty list;
    /// moderation clients handle the 404 explicitly.
    async fn list_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, Error>;

    /// Move a project to the action's target status.
    ///
    /// No illegal-transition guard exists: any status may move to any other,
    /// including re-approving a rejected project.
    async fn transition(
        &self,
        project: ProjectId,
        action: ModerationAction,
    ) -> Result<Project, Error>;
}
