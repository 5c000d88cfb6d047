//! Poll errors
//!
//! Every failure a poll cycle can raise. None of them is fatal: the poll
//! loop reports each one to the chat and carries on.

use thiserror::Error;
use verdict_client::{ApiError, truncate_chars};
use verdict_core::{MalformedResponse, StatusError};

/// A failure in the request, validate or translate steps of a poll cycle
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),

    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Longest chat message the messaging API accepts, in chars
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Text of the chat message reporting a failed poll cycle
///
/// Capped at `MAX_MESSAGE_CHARS` so the report itself is never rejected.
pub fn failure_message(error: &PollError) -> String {
    let cause = match error {
        PollError::Api(e @ ApiError::ConnectionFailure { .. }) => {
            format!("review API is unreachable: {}", e)
        }
        PollError::Api(e @ ApiError::InvalidResponseCode { .. }) => {
            format!("review API answered with an error: {}", e)
        }
        PollError::Api(e @ ApiError::InvalidBody { .. }) => {
            format!("review API answered with an unreadable body: {}", e)
        }
        PollError::Malformed(e) => format!("malformed API response: {}", e),
        PollError::Status(e @ StatusError::UnknownStatus { .. }) => {
            format!("unexpected homework status: {}", e)
        }
        PollError::Status(e @ (StatusError::MissingField(_) | StatusError::InvalidItem(_))) => {
            format!("unreadable homework record: {}", e)
        }
    };

    truncate_chars(&format!("Program failure: {}", cause), MAX_MESSAGE_CHARS)
}
