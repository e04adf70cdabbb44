//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to the document
//! store collaborator; each trait exposes strongly typed errors so adapters
//! map their failures into predictable variants. Driving ports mirror the
//! three role-gated route groups of the HTTP surface.

mod donation_ledger;
mod engagement;
mod project_authoring;
mod project_moderation;
mod project_repository;
mod user_repository;

pub use donation_ledger::{DonationLedger, DonationLedgerError, DonationReceipt};
pub use engagement::Engagement;
pub use project_authoring::ProjectAuthoring;
pub use project_moderation::ProjectModeration;
pub use project_repository::{ProjectRepository, ProjectStoreError};
pub use user_repository::{UserRepository, UserStoreError};

#[cfg(test)]
pub use donation_ledger::MockDonationLedger;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
