//! Donation records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::project::{Amount, ProjectId};
use super::user::UserId;

/// Stable donation identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DonationId(Uuid);

impl DonationId {
    /// Generate a new random [`DonationId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An immutable financial contribution linked to a project and donor.
///
/// ## Invariants
/// - Never mutated after creation.
/// - Its existence implies the project's raised amount was incremented by
///   `amount` in the same atomic ledger operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    pub project: ProjectId,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub donor: UserId,
    pub amount: Amount,
    /// Reference issued by the external payment collaborator.
    pub payment_ref: String,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Construct a donation record with a fresh identifier.
    pub fn new(
        project: ProjectId,
        donor: UserId,
        amount: Amount,
        payment_ref: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DonationId::random(),
            project,
            donor,
            amount,
            payment_ref: payment_ref.into(),
            created_at,
        }
    }
}
