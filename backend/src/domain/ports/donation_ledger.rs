//! Port for the donation ledger.
//!
//! Recording a donation and incrementing the project's raised amount is one
//! atomic unit. The adapter performs the status check under the same lock or
//! transaction as the increment, so an `Approved` check can never race with
//! a concurrent blacklist.

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::project::{Amount, Project, ProjectId, ProjectStatus};
use crate::domain::user::UserId;

/// Errors surfaced by donation ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationLedgerError {
    /// No project exists under the donation's project id.
    #[error("project {id} not found")]
    MissingProject { id: ProjectId },
    /// The project exists but is not accepting donations.
    #[error("project {id} is not accepting donations while {status}")]
    NotAccepting { id: ProjectId, status: ProjectStatus },
    /// Recording the amount would overflow the project's raised total. The
    /// donation is refused and nothing is written.
    #[error("project {id} cannot accept {amount}: raised amount would overflow")]
    Overflow { id: ProjectId, amount: Amount },
    /// Ledger connectivity or write failure.
    #[error("donation ledger failed: {message}")]
    Storage { message: String },
}

impl DonationLedgerError {
    /// Helper for ledger-level failures.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Outcome of a recorded donation: the immutable record plus the project as
/// it stood immediately after the increment.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationReceipt {
    pub donation: Donation,
    pub project: Project,
}

/// Atomic ledger port for donations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationLedger: Send + Sync {
    /// Record the donation and increment the project's raised amount as a
    /// single atomic unit. Only `Approved` projects accept donations.
    async fn record(&self, donation: Donation) -> Result<DonationReceipt, DonationLedgerError>;

    /// Fetch every donation made by the given donor, newest first.
    async fn history_for_donor(
        &self,
        donor: &UserId,
    ) -> Result<Vec<Donation>, DonationLedgerError>;
}
