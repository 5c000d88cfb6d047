//! Poll cursor
//!
//! The lower bound (epoch seconds) of the next status query window.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer checkpoint marking the time boundary for the next poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollCursor(i64);

impl PollCursor {
    /// Cursor positioned at the given epoch second
    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }

    /// Cursor positioned at the current wall-clock time
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Epoch seconds, as sent in the `from_date` query parameter
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Moves to the server-reported date, or stays put when none was reported
    pub fn advance(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.0 = date;
        }
    }
}

impl fmt::Display for PollCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
