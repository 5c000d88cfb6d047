//! Error types for the verdict clients

use thiserror::Error;

/// Longest error body kept in `ApiError::InvalidResponseCode`, in chars
pub const MAX_ERROR_BODY_CHARS: usize = 1000;

const TRUNCATION_SUFFIX: &str = "... [truncated]";

/// Cuts `text` to at most `max_chars` chars, marking the cut
///
/// The suffix counts toward the limit, so the result never exceeds it.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(TRUNCATION_SUFFIX.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}

/// Errors from the homework statuses endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, refused connection, timeout
    #[error("connection to {url} failed (from_date={from_date}): {source}")]
    ConnectionFailure {
        url: String,
        from_date: i64,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a status other than 200 OK
    ///
    /// `body` is capped at `MAX_ERROR_BODY_CHARS`.
    #[error(
        "unexpected response code from {url} (from_date={from_date}): status {status}, reason {reason}, body {body}"
    )]
    InvalidResponseCode {
        url: String,
        from_date: i64,
        status: u16,
        reason: String,
        body: String,
    },

    /// The endpoint answered 200 OK but the body is not JSON
    #[error("response from {url} (from_date={from_date}) is not valid JSON: {source}")]
    InvalidBody {
        url: String,
        from_date: i64,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the endpoint answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidResponseCode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a request timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectionFailure { source, .. } if source.is_timeout())
    }
}

/// Notification delivery failure
///
/// Callers are expected to log and drop it; there is no retry path.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The messaging API could not be reached
    ///
    /// The request URL embeds the bot token, so it is stripped from the source.
    #[error("failed to reach the messaging API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The messaging API refused the message
    #[error("messaging API rejected the message (status {status}): {description}")]
    Rejected { status: u16, description: String },

    /// The messaging API answered with something that is not its JSON envelope
    #[error("messaging API returned an unreadable response: {0}")]
    InvalidBody(String),
}
