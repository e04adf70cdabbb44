//! Port for user persistence.
//!
//! The canonical account record belongs to the auth collaborator; this port
//! only stores the slice the core owns (the follow set).

use async_trait::async_trait;

use crate::domain::user::{User, UserId};

/// Errors surfaced by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connectivity or query failure.
    #[error("user store failed: {message}")]
    Storage { message: String },
}

impl UserStoreError {
    /// Helper for store-level failures.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Persistence port for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Insert or replace a user record.
    async fn upsert(&self, user: &User) -> Result<(), UserStoreError>;
}
