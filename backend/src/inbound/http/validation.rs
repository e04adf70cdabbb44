//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Category, Error, ImageRef, ModerationAction, ProjectStatus};

/// Error for a field the request must carry.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap a required request field.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a category string from the request body.
pub(crate) fn parse_category(value: &str) -> Result<Category, Error> {
    Category::from_str(value).map_err(|_| {
        Error::invalid_request("unknown category").with_details(json!({
            "field": "category",
            "value": value,
            "code": "unknown_category",
        }))
    })
}

// Both moderation path segments answer with the same message; clients
// match on it, so the status variant keeps the "action" wording.
const INVALID_ACTION: &str = "Invalid action parameter";

/// Parse the status segment of the moderation list route.
pub(crate) fn parse_status_segment(value: &str) -> Result<ProjectStatus, Error> {
    ProjectStatus::from_str(value).map_err(|_| {
        Error::invalid_request(INVALID_ACTION).with_details(json!({
            "segment": value,
            "code": "unknown_status",
        }))
    })
}

/// Parse the action segment of the moderation transition route.
pub(crate) fn parse_action_segment(value: &str) -> Result<ModerationAction, Error> {
    ModerationAction::from_str(value).map_err(|_| {
        Error::invalid_request(INVALID_ACTION).with_details(json!({
            "segment": value,
            "code": "unknown_action",
        }))
    })
}

/// Validate a list of stored file references.
pub(crate) fn parse_image_refs(values: Vec<String>) -> Result<Vec<ImageRef>, Error> {
    values
        .into_iter()
        .map(|value| ImageRef::new(value).map_err(Error::from))
        .collect()
}
