//! In-memory document store adapter.
//!
//! Stands in for the external document store collaborator: record-by-id
//! lookup, filtered listing, and conditional saves. A single mutex guards
//! the whole store, which gives the donation ledger its atomicity: the
//! status check, raised-amount increment, and donation append all happen
//! under one lock acquisition.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    DonationLedger, DonationLedgerError, DonationReceipt, ProjectRepository, ProjectStoreError,
    UserRepository, UserStoreError,
};
use crate::domain::{Donation, Project, ProjectId, ProjectStatus, User, UserId};

#[derive(Debug, Default)]
struct StoreInner {
    projects: HashMap<Uuid, Project>,
    users: HashMap<Uuid, User>,
    donations: Vec<Donation>,
}

/// In-memory store implementing every driven port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, StoreInner>, String> {
        self.inner
            .lock()
            .map_err(|_| "store mutex poisoned".to_owned())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectStoreError> {
        let guard = self.guard().map_err(ProjectStoreError::storage)?;
        Ok(guard.projects.get(id.as_uuid()).cloned())
    }

    async fn find_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let guard = self.guard().map_err(ProjectStoreError::storage)?;
        Ok(guard
            .projects
            .values()
            .filter(|project| project.creator == *creator)
            .cloned()
            .collect())
    }

    async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let guard = self.guard().map_err(ProjectStoreError::storage)?;
        Ok(guard
            .projects
            .values()
            .filter(|project| project.status == status)
            .cloned()
            .collect())
    }

    async fn save(
        &self,
        project: &Project,
        expected_version: Option<u32>,
    ) -> Result<(), ProjectStoreError> {
        let mut guard = self.guard().map_err(ProjectStoreError::storage)?;
        let current = guard.projects.get(project.id.as_uuid());
        match (expected_version, current) {
            // Insert asserts the record does not exist yet.
            (None, Some(existing)) => Err(ProjectStoreError::version_mismatch(
                0,
                existing.version,
            )),
            (None, None) => {
                guard
                    .projects
                    .insert(*project.id.as_uuid(), project.clone());
                Ok(())
            }
            (Some(expected), None) => Err(ProjectStoreError::version_mismatch(expected, 0)),
            (Some(expected), Some(existing)) if existing.version != expected => Err(
                ProjectStoreError::version_mismatch(expected, existing.version),
            ),
            (Some(_), Some(_)) => {
                guard
                    .projects
                    .insert(*project.id.as_uuid(), project.clone());
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        let guard = self.guard().map_err(UserStoreError::storage)?;
        Ok(guard.users.get(id.as_uuid()).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut guard = self.guard().map_err(UserStoreError::storage)?;
        guard.users.insert(*user.id.as_uuid(), user.clone());
        Ok(())
    }
}

#[async_trait]
impl DonationLedger for MemoryStore {
    async fn record(&self, donation: Donation) -> Result<DonationReceipt, DonationLedgerError> {
        let mut guard = self.guard().map_err(DonationLedgerError::storage)?;
        let project = guard
            .projects
            .get_mut(donation.project.as_uuid())
            .ok_or(DonationLedgerError::MissingProject {
                id: donation.project,
            })?;
        if project.status != ProjectStatus::Approved {
            return Err(DonationLedgerError::NotAccepting {
                id: donation.project,
                status: project.status,
            });
        }
        // Checked so the raised total never wraps; the donation is refused
        // instead and the record stays untouched.
        let raised = project
            .raised_amount
            .checked_add(donation.amount.get())
            .ok_or(DonationLedgerError::Overflow {
                id: donation.project,
                amount: donation.amount,
            })?;
        project.raised_amount = raised;
        project.version += 1;
        project.updated_at = donation.created_at;
        let snapshot = project.clone();
        guard.donations.push(donation.clone());
        Ok(DonationReceipt {
            donation,
            project: snapshot,
        })
    }

    async fn history_for_donor(
        &self,
        donor: &UserId,
    ) -> Result<Vec<Donation>, DonationLedgerError> {
        let guard = self.guard().map_err(DonationLedgerError::storage)?;
        Ok(guard
            .donations
            .iter()
            .filter(|donation| donation.donor == *donor)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Category, ProjectDraft};
    use chrono::Utc;

    fn pending_project() -> Project {
        let draft = ProjectDraft::new(
            "Clean Water",
            "Wells for the district",
            Category::Health,
            "Y",
            Amount::new(5000).expect("positive"),
            Vec::new(),
        )
        .expect("valid draft");
        Project::create(UserId::random(), draft, Utc::now())
    }

    #[tokio::test]
    async fn conditional_save_rejects_stale_versions() {
        let store = MemoryStore::new();
        let mut project = pending_project();
        store.save(&project, None).await.expect("insert");

        project.version = 2;
        store.save(&project, Some(1)).await.expect("first update");

        // A writer still holding version 1 must be rejected.
        let error = store
            .save(&project, Some(1))
            .await
            .expect_err("stale write rejected");
        assert_eq!(error, ProjectStoreError::version_mismatch(1, 2));
    }

    #[tokio::test]
    async fn insert_asserts_absence() {
        let store = MemoryStore::new();
        let project = pending_project();
        store.save(&project, None).await.expect("insert");
        let error = store
            .save(&project, None)
            .await
            .expect_err("duplicate insert rejected");
        assert!(matches!(error, ProjectStoreError::VersionMismatch { .. }));
    }

    #[tokio::test]
    async fn ledger_increments_and_records_atomically() {
        let store = MemoryStore::new();
        let mut project = pending_project();
        project.status = ProjectStatus::Approved;
        store.save(&project, None).await.expect("insert");

        let donor = UserId::random();
        let donation = Donation::new(
            project.id,
            donor,
            Amount::new(750).expect("positive"),
            "pay_1",
            Utc::now(),
        );
        let receipt = store.record(donation).await.expect("donation accepted");
        assert_eq!(receipt.project.raised_amount, 750);

        let history = store
            .history_for_donor(&donor)
            .await
            .expect("history succeeds");
        assert_eq!(history.len(), 1);

        let stored = ProjectRepository::find_by_id(&store, &project.id)
            .await
            .expect("lookup succeeds")
            .expect("project present");
        assert_eq!(stored.raised_amount, 750);
        assert_eq!(stored.version, project.version + 1);
    }

    #[tokio::test]
    async fn ledger_refuses_donations_that_would_overflow_the_total() {
        let store = MemoryStore::new();
        let mut project = pending_project();
        project.status = ProjectStatus::Approved;
        project.raised_amount = u64::MAX - 5;
        store.save(&project, None).await.expect("insert");

        let donor = UserId::random();
        let donation = Donation::new(
            project.id,
            donor,
            Amount::new(10).expect("positive"),
            "pay_3",
            Utc::now(),
        );
        let error = store.record(donation).await.expect_err("overflow refused");
        assert!(matches!(error, DonationLedgerError::Overflow { .. }));

        // Nothing was written: total, version, and history are untouched.
        let stored = ProjectRepository::find_by_id(&store, &project.id)
            .await
            .expect("lookup succeeds")
            .expect("project present");
        assert_eq!(stored.raised_amount, u64::MAX - 5);
        assert_eq!(stored.version, project.version);
        let history = store
            .history_for_donor(&donor)
            .await
            .expect("history succeeds");
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn ledger_refuses_non_approved_projects() {
        let store = MemoryStore::new();
        let project = pending_project();
        store.save(&project, None).await.expect("insert");

        let donation = Donation::new(
            project.id,
            UserId::random(),
            Amount::new(10).expect("positive"),
            "pay_2",
            Utc::now(),
        );
        let error = store.record(donation).await.expect_err("pending refused");
        assert!(matches!(error, DonationLedgerError::NotAccepting { .. }));

        let stored = ProjectRepository::find_by_id(&store, &project.id)
            .await
            .expect("lookup succeeds")
            .expect("project present");
        assert_eq!(stored.raised_amount, 0);
    }
}
