//! Donor engagement domain service.
//!
//! Implements the engagement driving port: following approved projects and
//! donating through the atomic ledger.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::donation::Donation;
use super::ports::{
    DonationLedger, DonationLedgerError, DonationReceipt, Engagement, ProjectRepository,
    ProjectStoreError, UserRepository, UserStoreError,
};
use super::project::{Amount, Project, ProjectId, ProjectStatus};
use super::user::{Role, User, UserId};
use super::Error;

/// Domain service for follows and donations.
#[derive(Clone)]
pub struct EngagementService<P, U, L> {
    projects: Arc<P>,
    users: Arc<U>,
    ledger: Arc<L>,
}

impl<P, U, L> EngagementService<P, U, L> {
    /// Create a new service over the given adapters.
    pub fn new(projects: Arc<P>, users: Arc<U>, ledger: Arc<L>) -> Self {
        Self {
            projects,
            users,
            ledger,
        }
    }
}

impl<P, U, L> EngagementService<P, U, L>
where
    P: ProjectRepository,
    U: UserRepository,
    L: DonationLedger,
{
    fn map_project_error(error: ProjectStoreError) -> Error {
        match error {
            ProjectStoreError::Storage { message } => {
                Error::internal(format!("project store error: {message}"))
            }
            ProjectStoreError::VersionMismatch { .. } => {
                Error::conflict("project was modified concurrently")
            }
        }
    }

    fn map_user_error(error: UserStoreError) -> Error {
        let UserStoreError::Storage { message } = error;
        Error::internal(format!("user store error: {message}"))
    }

    fn map_ledger_error(error: DonationLedgerError) -> Error {
        match error {
            // Absence and a non-Approved status look identical to donors;
            // only Approved projects exist on this surface.
            DonationLedgerError::MissingProject { .. }
            | DonationLedgerError::NotAccepting { .. } => Error::not_found("Project not found"),
            DonationLedgerError::Overflow { .. } => {
                Error::conflict("Donation would overflow the project's raised amount")
            }
            DonationLedgerError::Storage { message } => {
                Error::internal(format!("donation ledger error: {message}"))
            }
        }
    }

    /// Fetch an `Approved` project or fail with `NotFound`.
    async fn fetch_approved(&self, project: ProjectId) -> Result<Project, Error> {
        let found = self
            .projects
            .find_by_id(&project)
            .await
            .map_err(Self::map_project_error)?;
        match found {
            Some(record) if record.status == ProjectStatus::Approved => Ok(record),
            _ => Err(Error::not_found("Project not found")),
        }
    }

    /// Load the follow record for a user, starting a fresh one on first
    /// contact. The canonical account lives with the auth collaborator, so
    /// absence here just means the user has not engaged yet.
    async fn fetch_or_default(&self, user: UserId) -> Result<User, Error> {
        let found = self
            .users
            .find_by_id(&user)
            .await
            .map_err(Self::map_user_error)?;
        Ok(found.unwrap_or_else(|| User::new(user, Role::User)))
    }
}

#[async_trait]
impl<P, U, L> Engagement for EngagementService<P, U, L>
where
    P: ProjectRepository,
    U: UserRepository,
    L: DonationLedger,
{
    async fn follow(&self, project: ProjectId, user: UserId) -> Result<Project, Error> {
        let record = self.fetch_approved(project).await?;
        let mut follower = self.fetch_or_default(user).await?;
        if !follower.follow(record.id) {
            return Err(Error::conflict("Already following this project"));
        }
        self.users
            .upsert(&follower)
            .await
            .map_err(Self::map_user_error)?;
        Ok(record)
    }

    async fn donate(
        &self,
        project: ProjectId,
        donor: UserId,
        amount: Amount,
        payment_ref: String,
    ) -> Result<DonationReceipt, Error> {
        let donation = Donation::new(project, donor, amount, payment_ref, Utc::now());
        let receipt = self
            .ledger
            .record(donation)
            .await
            .map_err(Self::map_ledger_error)?;
        tracing::info!(
            donation = %receipt.donation.id,
            project = %receipt.project.id,
            amount = %receipt.donation.amount,
            "donation recorded"
        );
        Ok(receipt)
    }

    async fn donation_history(&self, donor: UserId) -> Result<Vec<Donation>, Error> {
        let mut donations = self
            .ledger
            .history_for_donor(&donor)
            .await
            .map_err(Self::map_ledger_error)?;
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockDonationLedger, MockProjectRepository, MockUserRepository};
    use crate::domain::{Category, ErrorCode, ProjectDraft};

    fn approved_project(creator: UserId) -> Project {
        let draft = ProjectDraft::new(
            "Plant Trees",
            "Reforest the valley",
            Category::Environment,
            "X",
            Amount::new(1000).expect("positive"),
            Vec::new(),
        )
        .expect("valid draft");
        let mut project = Project::create(creator, draft, Utc::now());
        project.status = ProjectStatus::Approved;
        project
    }

    fn service(
        projects: MockProjectRepository,
        users: MockUserRepository,
        ledger: MockDonationLedger,
    ) -> EngagementService<MockProjectRepository, MockUserRepository, MockDonationLedger> {
        EngagementService::new(Arc::new(projects), Arc::new(users), Arc::new(ledger))
    }

    #[tokio::test]
    async fn follow_starts_a_record_on_first_contact() {
        let project = approved_project(UserId::random());
        let id = project.id;
        let user = UserId::random();

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(project)));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).return_once(|_| Ok(None));
        users
            .expect_upsert()
            .withf(move |record| record.id == user && record.follows(id))
            .times(1)
            .return_once(|_| Ok(()));

        let followed = service(projects, users, MockDonationLedger::new())
            .follow(id, user)
            .await
            .expect("follow succeeds");
        assert_eq!(followed.id, id);
    }

    #[tokio::test]
    async fn follow_twice_is_a_conflict() {
        let project = approved_project(UserId::random());
        let id = project.id;
        let user_id = UserId::random();
        let mut existing = User::new(user_id, Role::User);
        assert!(existing.follow(id));

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(project)));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        users.expect_upsert().times(0);

        let error = service(projects, users, MockDonationLedger::new())
            .follow(id, user_id)
            .await
            .expect_err("duplicate follow rejected");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest::rstest]
    #[case(ProjectStatus::Pending)]
    #[case(ProjectStatus::Rejected)]
    #[case(ProjectStatus::Blacklisted)]
    #[tokio::test]
    async fn follow_requires_an_approved_project(#[case] status: ProjectStatus) {
        let mut project = approved_project(UserId::random());
        project.status = status;
        let id = project.id;

        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(project)));

        let error = service(projects, MockUserRepository::new(), MockDonationLedger::new())
            .follow(id, UserId::random())
            .await
            .expect_err("non-approved project hidden");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn donate_maps_refusals_to_not_found() {
        let mut ledger = MockDonationLedger::new();
        ledger.expect_record().times(1).return_once(|donation| {
            Err(DonationLedgerError::NotAccepting {
                id: donation.project,
                status: ProjectStatus::Pending,
            })
        });

        let error = service(MockProjectRepository::new(), MockUserRepository::new(), ledger)
            .donate(
                ProjectId::random(),
                UserId::random(),
                Amount::new(500).expect("positive"),
                "pay_1".to_owned(),
            )
            .await
            .expect_err("pending project refuses donations");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn donate_maps_overflow_to_conflict() {
        let mut ledger = MockDonationLedger::new();
        ledger.expect_record().times(1).return_once(|donation| {
            Err(DonationLedgerError::Overflow {
                id: donation.project,
                amount: donation.amount,
            })
        });

        let error = service(MockProjectRepository::new(), MockUserRepository::new(), ledger)
            .donate(
                ProjectId::random(),
                UserId::random(),
                Amount::new(i64::MAX).expect("positive"),
                "pay_2".to_owned(),
            )
            .await
            .expect_err("overflowing donation refused");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn donation_history_is_newest_first() {
        let donor = UserId::random();
        let project = ProjectId::random();
        let older = Donation::new(
            project,
            donor,
            Amount::new(100).expect("positive"),
            "pay_old",
            Utc::now() - chrono::Duration::hours(1),
        );
        let newer = Donation::new(
            project,
            donor,
            Amount::new(200).expect("positive"),
            "pay_new",
            Utc::now(),
        );
        let unordered = vec![older.clone(), newer.clone()];

        let mut ledger = MockDonationLedger::new();
        ledger
            .expect_history_for_donor()
            .times(1)
            .return_once(move |_| Ok(unordered));

        let history = service(MockProjectRepository::new(), MockUserRepository::new(), ledger)
            .donation_history(donor)
            .await
            .expect("history succeeds");
        assert_eq!(history, vec![newer, older]);
    }
}
