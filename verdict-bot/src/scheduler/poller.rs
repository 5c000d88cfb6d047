//! Status poller
//!
//! Polls the review API for status changes and relays them to the chat.
//! One cycle: request statuses since the cursor, validate the payload,
//! pick the most recent work item, translate it, notify, advance the cursor.
//! Any failure in a cycle is itself reported to the chat, and the loop
//! sleeps for the retry period before the next cycle.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use verdict_client::ReviewApi;
use verdict_core::{PollCursor, check_response, parse_status};

use crate::error::{PollError, failure_message};
use crate::service::NotificationService;

/// What a single loop iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The response held no work items; nothing was sent
    Quiet,
    /// A status change was translated and a notification attempted
    Notified { delivered: bool },
    /// The cycle failed and a failure report was attempted
    Failed { delivered: bool },
}

/// Single-subject poller owning the poll cursor
pub struct StatusPoller {
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn NotificationService>,
    cursor: PollCursor,
    retry_period: Duration,
}

impl StatusPoller {
    /// Creates a new poller
    ///
    /// # Arguments
    /// * `api` - Source of homework status changes
    /// * `notifier` - Where status changes and failure reports go
    /// * `cursor` - Lower bound of the first query window
    /// * `retry_period` - Pause after every iteration
    pub fn new(
        api: Arc<dyn ReviewApi>,
        notifier: Arc<dyn NotificationService>,
        cursor: PollCursor,
        retry_period: Duration,
    ) -> Self {
        Self {
            api,
            notifier,
            cursor,
            retry_period,
        }
    }

    /// Current lower bound of the query window
    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    /// Runs the loop forever
    ///
    /// Never returns: every failure is reported and the loop continues.
    pub async fn run(mut self) {
        info!(
            "Starting status poller (interval: {:?}, from_date: {})",
            self.retry_period, self.cursor
        );

        loop {
            let outcome = self.tick().await;
            debug!("Iteration finished: {:?}", outcome);

            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Performs one loop iteration, containing any failure
    pub async fn tick(&mut self) -> TickOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = failure_message(&e);
                error!("{}", message);

                let delivered = self.notifier.notify(&message).await;
                TickOutcome::Failed { delivered }
            }
        }
    }

    /// Performs a single poll cycle
    ///
    /// Only the first work item of a response is considered: the review API
    /// lists the most recent change first, and older changes in the same
    /// batch are dropped. Once the payload validates, the cursor moves to
    /// the server's `current_date` even if translating the item fails, so a
    /// broken item is reported once rather than on every cycle. A payload
    /// that fails validation leaves the cursor untouched.
    async fn poll_once(&mut self) -> Result<TickOutcome, PollError> {
        let payload = self.api.homework_statuses(self.cursor.timestamp()).await?;

        debug!("Checking API response");
        let response = check_response(&payload)?;

        let message = response.latest().map(parse_status).transpose();

        self.cursor.advance(Some(response.current_date));
        debug!("Cursor advanced to {}", self.cursor);

        match message? {
            Some(message) => {
                let delivered = self.notifier.notify(&message).await;
                Ok(TickOutcome::Notified { delivered })
            }
            None => {
                debug!("No status changes");
                Ok(TickOutcome::Quiet)
            }
        }
    }
}
