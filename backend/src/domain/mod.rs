//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers. Types are validated at construction and document
//! their invariants and serialisation contracts (serde) in Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure taxonomy.
//! - `Project` and its value types: the moderated campaign aggregate.
//! - `User` / `Role` / `Capability`: identity and the capability policy.
//! - `Donation`: the immutable contribution record.
//! - `ports`: repository and use-case traits at the edges of the hexagon.

pub mod donation;
pub mod engagement_service;
pub mod error;
pub mod lifecycle_service;
pub mod ports;
pub mod project;
pub mod user;

pub use self::donation::{Donation, DonationId};
pub use self::engagement_service::EngagementService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::lifecycle_service::ProjectLifecycleService;
pub use self::project::{
    Amount, AmountError, Category, ImageRef, Milestone, ModerationAction, Project, ProjectDraft,
    ProjectId, ProjectPatch, ProjectStatus, ProjectValidationError,
};
pub use self::user::{Capability, Role, User, UserId};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
