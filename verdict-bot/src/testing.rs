//! In-memory fakes of the remote services

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use verdict_client::{ApiError, DeliveryError, MessageSender, ReviewApi};

/// Review API replaying scripted answers
///
/// Once the script runs out it answers with an empty batch stamped with the
/// requested date.
#[derive(Default)]
pub struct FakeApi {
    answers: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<i64>>,
}

impl FakeApi {
    pub fn new(answers: Vec<Result<Value, ApiError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `from_date` of every request received so far
    pub fn requests(&self) -> Vec<i64> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewApi for FakeApi {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(from_date);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "homeworks": [], "current_date": from_date })))
    }
}

/// Messaging capability recording every attempt
#[derive(Default)]
pub struct FakeSender {
    sent: Mutex<Vec<(String, String)>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl FakeSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Successfully delivered `(chat_id, text)` pairs
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSender for FakeSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(DeliveryError::Rejected {
                status: 403,
                description: "Forbidden: bot was blocked by the user".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// A transport-level failure as the review client reports it
pub fn connection_failure(from_date: i64) -> ApiError {
    let source = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();

    ApiError::ConnectionFailure {
        url: "not a url".to_string(),
        from_date,
        source,
    }
}
