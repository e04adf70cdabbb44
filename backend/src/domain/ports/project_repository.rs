//! Port for project persistence.
//!
//! The store collaborator guarantees per-record atomic writes only, so the
//! repository contract carries an optimistic-concurrency version check: a
//! conditional save whose expected version is stale is rejected instead of
//! silently last-write-wins.

use async_trait::async_trait;

use crate::domain::project::{Project, ProjectId, ProjectStatus};
use crate::domain::user::UserId;

/// Errors surfaced by project store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectStoreError {
    /// Store connectivity or query failure.
    #[error("project store failed: {message}")]
    Storage { message: String },
    /// Conditional write rejected because the record moved on.
    #[error("version mismatch: expected {expected}, found {actual}")]
    VersionMismatch { expected: u32, actual: u32 },
}

impl ProjectStoreError {
    /// Helper for store-level failures.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Helper for stale conditional writes.
    pub fn version_mismatch(expected: u32, actual: u32) -> Self {
        Self::VersionMismatch { expected, actual }
    }
}

/// Persistence port for project records.
///
/// # Version semantics
///
/// - New projects are saved with `expected_version: None`, asserting no
///   record exists yet under the id.
/// - Updates pass the version the caller read; the adapter rejects the save
///   with [`ProjectStoreError::VersionMismatch`] when the stored version
///   differs. The caller bumps `project.version` before saving; the adapter
///   never increments it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectStoreError>;

    /// Fetch every project owned by the given creator.
    async fn find_by_creator(&self, creator: &UserId) -> Result<Vec<Project>, ProjectStoreError>;

    /// Fetch every project in the given status.
    async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, ProjectStoreError>;

    /// Persist a project with an optimistic-concurrency check.
    async fn save(
        &self,
        project: &Project,
        expected_version: Option<u32>,
    ) -> Result<(), ProjectStoreError>;
}
