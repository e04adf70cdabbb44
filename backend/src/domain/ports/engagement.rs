//! Driving port for donor-facing engagement.

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::ports::donation_ledger::DonationReceipt;
use crate::domain::project::{Amount, Project, ProjectId};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Use-cases available to the user role.
#[async_trait]
pub trait Engagement: Send + Sync {
    /// Follow an `Approved` project.
    ///
    /// Fails with `NotFound` when the project is absent or not `Approved`,
    /// and with `Conflict` when the user already follows it.
    async fn follow(&self, project: ProjectId, user: UserId) -> Result<Project, Error>;

    /// Donate to an `Approved` project.
    ///
    /// The donation record and the raised-amount increment are applied as
    /// one atomic ledger operation.
    async fn donate(
        &self,
        project: ProjectId,
        donor: UserId,
        amount: Amount,
        payment_ref: String,
    ) -> Result<DonationReceipt, Error>;

    /// The donor's donation history, newest first. May be empty.
    async fn donation_history(&self, donor: UserId) -> Result<Vec<Donation>, Error>;
}
