//! Homework domain types
//!
//! A work item is one submitted assignment as reported by the review API.
//! Translating its status into a notification text is a pure function of
//! the item.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Review status of a submitted work item
///
/// The set is closed: any other code coming from the API is an error,
/// never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// All statuses the review API is known to emit
    pub const ALL: [ReviewStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Wire code of the status, as sent by the review API
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sentence for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review by the reviewer.",
            Self::Rejected => "The work has been reviewed: the reviewer has remarks.",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Errors raised while turning a work item into a notification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// A mandatory key is absent (or null) in the work item
    #[error("work item is missing the `{0}` key")]
    MissingField(&'static str),

    /// The status code is not one of the recognized review statuses
    #[error("unknown review status `{status}` for homework \"{homework_name}\"")]
    UnknownStatus {
        homework_name: String,
        status: String,
    },

    /// The work item is not an object or one of its keys has the wrong type
    #[error("work item has an invalid shape: {0}")]
    InvalidItem(String),
}

/// One submitted assignment's status record
///
/// Both keys are mandatory for translation, but they are modelled as
/// optional so that a missing key is reported as such instead of as a
/// generic decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl WorkItem {
    /// Creates a complete work item
    pub fn new(homework_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(homework_name.into()),
            status: Some(status.into()),
        }
    }

    /// Decodes a work item from one element of the `homeworks` array
    pub fn from_value(value: &Value) -> Result<Self, StatusError> {
        if !value.is_object() {
            return Err(StatusError::InvalidItem(format!(
                "expected an object, got {}",
                json_kind(value)
            )));
        }

        serde_json::from_value(value.clone()).map_err(|e| StatusError::InvalidItem(e.to_string()))
    }

    /// Builds the notification text for this item
    ///
    /// Keys are checked in order `homework_name`, then `status`.
    pub fn status_message(&self) -> Result<String, StatusError> {
        let homework_name = self
            .homework_name
            .as_deref()
            .ok_or(StatusError::MissingField("homework_name"))?;
        let code = self
            .status
            .as_deref()
            .ok_or(StatusError::MissingField("status"))?;

        let status: ReviewStatus = code.parse().map_err(|status| StatusError::UnknownStatus {
            homework_name: homework_name.to_string(),
            status,
        })?;

        Ok(format!(
            "Changed review status of \"{}\": {}",
            homework_name,
            status.verdict()
        ))
    }
}

/// Translates a raw work item into a notification text
pub fn parse_status(value: &Value) -> Result<String, StatusError> {
    WorkItem::from_value(value)?.status_message()
}

/// Short name of a JSON value's kind, for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
