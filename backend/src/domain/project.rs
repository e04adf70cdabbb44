//! Project aggregate and its value types.
//!
//! A project is a fundable campaign with a moderation lifecycle. The status
//! machine has four states (`Pending`, `Approved`, `Rejected`,
//! `Blacklisted`) with `Pending` as the sole initial state. Moderators move
//! projects between states via [`ModerationAction`]; there is no guard on
//! re-transition, so every state remains reachable from every other
//! (recorded as an open question in DESIGN.md rather than hardened here).
//!
//! ## Invariants
//! - `creator` is set once at creation and never changes.
//! - `raised_amount` starts at zero and only ever increases, and only while
//!   the project is `Approved` (enforced by the donation ledger adapter).
//! - `milestones` is append-only.
//! - Field edits are only permitted while the status is `Pending`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;
use super::{Error, ErrorCode};

/// Stable project identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a new random [`ProjectId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical string form.
    pub fn parse(value: &str) -> Result<Self, Error> {
        Uuid::parse_str(value).map(Self).map_err(|_| {
            Error::invalid_request("project id must be a valid UUID")
                .with_details(json!({ "field": "id", "value": value, "code": "invalid_uuid" }))
        })
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of campaign categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Education,
    Environment,
    Health,
    Crisis,
    Other,
}

impl Category {
    /// Canonical wire representation, matching the stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Environment => "Environment",
            Self::Health => "Health",
            Self::Crisis => "Crisis",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            Self::Education,
            Self::Environment,
            Self::Health,
            Self::Crisis,
            Self::Other,
        ]
        .into_iter()
        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| CategoryParseError(value.to_owned()))
    }
}

/// Moderation lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
    Blacklisted,
}

impl ProjectStatus {
    /// Stored string form, capitalised like the document records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Blacklisted => "Blacklisted",
        }
    }

    /// Lower-case label used in human-readable messages and URL segments.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Blacklisted => "blacklisted",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for ProjectStatus {
    type Err = StatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [
            Self::Pending,
            Self::Approved,
            Self::Rejected,
            Self::Blacklisted,
        ]
        .into_iter()
        .find(|candidate| candidate.label().eq_ignore_ascii_case(value))
        .ok_or_else(|| StatusParseError(value.to_owned()))
    }
}

/// Moderator command moving a project to a deterministic target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Blacklist,
}

impl ModerationAction {
    /// Status the project ends in after this action.
    pub fn target(self) -> ProjectStatus {
        match self {
            Self::Approve => ProjectStatus::Approved,
            Self::Reject => ProjectStatus::Rejected,
            Self::Blacklist => ProjectStatus::Blacklisted,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown moderation action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown moderation action: {0}")]
pub struct ActionParseError(pub String);

impl FromStr for ModerationAction {
    type Err = ActionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Approve, Self::Reject, Self::Blacklist]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ActionParseError(value.to_owned()))
    }
}

/// Error returned when constructing a non-positive [`Amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("amount must be greater than zero")]
pub struct AmountError;

/// Strictly positive monetary amount in minor currency units.
///
/// Serialises as a plain integer; deserialisation rejects zero and negative
/// values so a stored amount can never violate the positivity invariant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 1000)]
pub struct Amount(u64);

impl Amount {
    /// Validate and construct an [`Amount`] from a signed integer.
    pub fn new(value: i64) -> Result<Self, AmountError> {
        u64::try_from(value)
            .ok()
            .filter(|raw| *raw > 0)
            .map(Self)
            .ok_or(AmountError)
    }

    /// The amount in minor units.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for Amount {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        i64::try_from(value.0).unwrap_or(i64::MAX)
    }
}

/// Validation errors raised by project value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyTitle,
    EmptyDescription,
    EmptyLocation,
    NonPositiveGoal,
    EmptyMilestoneText,
    EmptyImageRef,
}

impl ProjectValidationError {
    /// Request field the failure refers to, in wire casing.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::EmptyLocation => "location",
            Self::NonPositiveGoal => "goalAmount",
            Self::EmptyMilestoneText => "text",
            Self::EmptyImageRef => "images",
        }
    }
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::NonPositiveGoal => write!(f, "goal amount must be greater than zero"),
            Self::EmptyMilestoneText => write!(f, "milestone text must not be empty"),
            Self::EmptyImageRef => write!(f, "image reference must not be empty"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}

impl From<ProjectValidationError> for Error {
    fn from(value: ProjectValidationError) -> Self {
        Self::new(ErrorCode::InvalidRequest, value.to_string())
            .with_details(json!({ "field": value.field(), "code": "validation" }))
    }
}

/// Opaque reference to a stored file, issued by the external file storage
/// collaborator. The core never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "/uploads/1724231231000.png")]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate and construct an [`ImageRef`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ProjectValidationError::EmptyImageRef);
        }
        Ok(Self(raw))
    }

    /// Borrow the reference as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

/// Append-only progress entry on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub created_at: DateTime<Utc>,
}

impl Milestone {
    /// Validate and construct a milestone with a server-assigned timestamp.
    pub fn new(
        text: impl Into<String>,
        image: Option<ImageRef>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ProjectValidationError::EmptyMilestoneText);
        }
        Ok(Self {
            text,
            image,
            created_at,
        })
    }
}

/// Validated input for creating a project.
///
/// Construction rejects blank strings and relies on [`Amount`] for goal
/// positivity, so a draft that exists is safe to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    title: String,
    description: String,
    category: Category,
    location: String,
    goal_amount: Amount,
    images: Vec<ImageRef>,
}

impl ProjectDraft {
    /// Validate and construct a draft.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        location: impl Into<String>,
        goal_amount: Amount,
        images: Vec<ImageRef>,
    ) -> Result<Self, ProjectValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ProjectValidationError::EmptyDescription);
        }
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ProjectValidationError::EmptyLocation);
        }
        Ok(Self {
            title,
            description,
            category,
            location,
            goal_amount,
            images,
        })
    }
}

/// Partial update applied to a `Pending` project.
///
/// Every present field is validated before any field is applied, so a failed
/// patch never leaves a partially updated record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub goal_amount: Option<Amount>,
}

impl ProjectPatch {
    fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(ProjectValidationError::EmptyDescription);
        }
        if self.location.as_deref().is_some_and(|l| l.trim().is_empty()) {
            return Err(ProjectValidationError::EmptyLocation);
        }
        Ok(())
    }
}

/// A fundable campaign record with lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub goal_amount: Amount,
    pub raised_amount: u64,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub creator: UserId,
    pub status: ProjectStatus,
    pub milestones: Vec<Milestone>,
    pub images: Vec<ImageRef>,
    /// Optimistic-concurrency revision checked by conditional saves.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a fresh `Pending` project from a validated draft.
    pub fn create(creator: UserId, draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        let ProjectDraft {
            title,
            description,
            category,
            location,
            goal_amount,
            images,
        } = draft;
        Self {
            id: ProjectId::random(),
            title,
            description,
            category,
            location,
            goal_amount,
            raised_amount: 0,
            creator,
            status: ProjectStatus::Pending,
            milestones: Vec::new(),
            images,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the creator may still edit the record.
    pub fn is_editable(&self) -> bool {
        matches!(self.status, ProjectStatus::Pending)
    }

    /// Merge a patch into the record.
    ///
    /// Validates the whole patch before touching any field; the record is
    /// unchanged on error.
    pub fn apply_patch(
        &mut self,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectValidationError> {
        patch.validate()?;
        let ProjectPatch {
            title,
            description,
            category,
            location,
            goal_amount,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(goal_amount) = goal_amount {
            self.goal_amount = goal_amount;
        }
        self.touch(now);
        Ok(())
    }

    /// Append a milestone. Milestones are never edited or removed.
    pub fn add_milestone(&mut self, milestone: Milestone, now: DateTime<Utc>) {
        self.milestones.push(milestone);
        self.touch(now);
    }

    /// Apply a moderation action and return the resulting status.
    ///
    /// Deliberately unguarded: any status may move to any other, re-approval
    /// of a rejected project included.
    pub fn apply_transition(
        &mut self,
        action: ModerationAction,
        now: DateTime<Utc>,
    ) -> ProjectStatus {
        self.status = action.target();
        self.touch(now);
        self.status
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = now;
    }
}
