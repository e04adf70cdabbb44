//! User identity, roles, and the capability policy.
//!
//! Requests arrive pre-authenticated by the upstream router; the domain only
//! decides what each role may do. Permissions are a closed capability set
//! checked through [`Role::grants`] rather than string comparison scattered
//! per route.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::project::ProjectId;
use super::Error;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical string form.
    pub fn parse(value: &str) -> Result<Self, Error> {
        Uuid::parse_str(value).map(Self).map_err(|_| {
            Error::unauthorized("user id must be a valid UUID")
                .with_details(json!({ "value": value, "code": "invalid_uuid" }))
        })
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of authenticated roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Creator,
    Moderator,
}

/// Actions a role may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    SubmitProject,
    EditOwnProject,
    ModerateProjects,
    FollowProject,
    Donate,
    ViewDonationHistory,
}

impl Capability {
    /// Stable label used in error details.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitProject => "submit_project",
            Self::EditOwnProject => "edit_own_project",
            Self::ModerateProjects => "moderate_projects",
            Self::FollowProject => "follow_project",
            Self::Donate => "donate",
            Self::ViewDonationHistory => "view_donation_history",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    /// Capability set granted to this role.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::User => &[
                Capability::FollowProject,
                Capability::Donate,
                Capability::ViewDonationHistory,
            ],
            Self::Creator => &[Capability::SubmitProject, Capability::EditOwnProject],
            Self::Moderator => &[Capability::ModerateProjects],
        }
    }

    /// Whether this role grants the given capability.
    pub fn grants(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Lower-case wire form, matching the upstream role annotation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Creator => "creator",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::User, Self::Creator, Self::Moderator]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| RoleParseError(value.to_owned()))
    }
}

/// Application user as referenced by the core.
///
/// The canonical account record lives with the auth collaborator; the core
/// keeps only what it owns: the follow set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: Role,
    /// Duplicate-free set of followed projects, stored in follow order.
    pub followed_projects: Vec<ProjectId>,
}

impl User {
    /// Create a user record with an empty follow set.
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            followed_projects: Vec::new(),
        }
    }

    /// Whether the user already follows the project.
    pub fn follows(&self, project: ProjectId) -> bool {
        self.followed_projects.contains(&project)
    }

    /// Add a follow reference. Returns `false` when the reference already
    /// exists, leaving the set unchanged.
    pub fn follow(&mut self, project: ProjectId) -> bool {
        if self.follows(project) {
            return false;
        }
        self.followed_projects.push(project);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::User, Capability::Donate, true)]
    #[case(Role::User, Capability::SubmitProject, false)]
    #[case(Role::Creator, Capability::SubmitProject, true)]
    #[case(Role::Creator, Capability::ModerateProjects, false)]
    #[case(Role::Moderator, Capability::ModerateProjects, true)]
    #[case(Role::Moderator, Capability::Donate, false)]
    fn capability_policy(#[case] role: Role, #[case] capability: Capability, #[case] granted: bool) {
        assert_eq!(role.grants(capability), granted);
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("CREATOR", Role::Creator)]
    #[case("Moderator", Role::Moderator)]
    fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("parses"), expected);
    }

    #[test]
    fn follow_is_duplicate_free() {
        let mut user = User::new(UserId::random(), Role::User);
        let project = ProjectId::random();
        assert!(user.follow(project));
        assert!(!user.follow(project));
        assert_eq!(user.followed_projects.len(), 1);
    }
}
