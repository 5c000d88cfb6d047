//! Homework status response DTO
//!
//! Validation of the payload returned by the homework statuses endpoint.
//! The expected shape is:
//!
//! ```json
//! { "homeworks": [ { "homework_name": "...", "status": "..." } ], "current_date": 1581604970 }
//! ```
//!
//! Validation fails fast. Fields are checked in a fixed order: `homeworks`
//! (presence, then type), then `current_date` (presence, then type).

use serde_json::Value;
use thiserror::Error;

use crate::domain::homework::json_kind;

/// The payload does not match the documented response shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("API response is not an object (got {found})")]
    NotAnObject { found: &'static str },

    #[error("API response is missing the `{0}` key")]
    MissingField(&'static str),

    #[error("API response key `{field}` is not {expected} (got {found})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// A validated status response
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    /// Work items changed since the requested date, newest first
    pub homeworks: Vec<Value>,
    /// Server time to use as the next query's lower bound
    pub current_date: i64,
}

impl StatusResponse {
    /// The notify-worthy item of this response
    ///
    /// The review API is assumed to return items newest first, so only
    /// the first element is considered. Older items in the same batch
    /// are dropped, not queued.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Checks a decoded payload against the documented response shape
pub fn check_response(payload: &Value) -> Result<StatusResponse, MalformedResponse> {
    let object = payload.as_object().ok_or(MalformedResponse::NotAnObject {
        found: json_kind(payload),
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or(MalformedResponse::MissingField("homeworks"))?;
    let homeworks = homeworks.as_array().ok_or(MalformedResponse::WrongType {
        field: "homeworks",
        expected: "an array",
        found: json_kind(homeworks),
    })?;

    let current_date = object
        .get("current_date")
        .ok_or(MalformedResponse::MissingField("current_date"))?;
    let current_date = current_date.as_i64().ok_or(MalformedResponse::WrongType {
        field: "current_date",
        expected: "an integer",
        found: json_kind(current_date),
    })?;

    Ok(StatusResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let payload = json!({
            "homeworks": [{ "homework_name": "lab1", "status": "approved" }],
            "current_date": 1000
        });

        let response = check_response(&payload).unwrap();
        assert_eq!(response.current_date, 1000);
        assert_eq!(response.homeworks.len(), 1);
    }

    #[test]
    fn test_empty_homeworks_is_valid() {
        let payload = json!({ "homeworks": [], "current_date": 2000 });

        let response = check_response(&payload).unwrap();
        assert!(response.latest().is_none());
        assert_eq!(response.current_date, 2000);
    }

    #[test]
    fn test_latest_is_first_element() {
        let payload = json!({
            "homeworks": [
                { "homework_name": "new", "status": "approved" },
                { "homework_name": "old", "status": "rejected" }
            ],
            "current_date": 1
        });

        let response = check_response(&payload).unwrap();
        assert_eq!(response.latest().unwrap()["homework_name"], "new");
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            check_response(&json!([1, 2])),
            Err(MalformedResponse::NotAnObject { found: "an array" })
        );
        assert_eq!(
            check_response(&Value::Null),
            Err(MalformedResponse::NotAnObject { found: "null" })
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            check_response(&json!({ "current_date": 1 })),
            Err(MalformedResponse::MissingField("homeworks"))
        );
        assert_eq!(
            check_response(&json!({ "homeworks": [] })),
            Err(MalformedResponse::MissingField("current_date"))
        );
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(
            check_response(&json!({ "homeworks": {}, "current_date": 1 })),
            Err(MalformedResponse::WrongType {
                field: "homeworks",
                expected: "an array",
                found: "an object",
            })
        );
        assert_eq!(
            check_response(&json!({ "homeworks": [], "current_date": "yesterday" })),
            Err(MalformedResponse::WrongType {
                field: "current_date",
                expected: "an integer",
                found: "a string",
            })
        );
        assert!(matches!(
            check_response(&json!({ "homeworks": [], "current_date": 1.5 })),
            Err(MalformedResponse::WrongType {
                field: "current_date",
                ..
            })
        ));
    }

    #[test]
    fn test_homeworks_checked_before_current_date() {
        // Both keys broken: the first one in check order is reported
        assert_eq!(
            check_response(&json!({})),
            Err(MalformedResponse::MissingField("homeworks"))
        );
        assert!(matches!(
            check_response(&json!({ "homeworks": "x", "current_date": "y" })),
            Err(MalformedResponse::WrongType {
                field: "homeworks",
                ..
            })
        ));
    }
}
