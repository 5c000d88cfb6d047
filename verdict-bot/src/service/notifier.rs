//! Notification service
//!
//! Best-effort delivery of a text to the configured chat. A failed send is
//! logged and dropped: it is never retried and never reaches the poll loop.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};
use verdict_client::MessageSender;

/// Service trait for delivering notifications
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Attempts to deliver `message` once
    ///
    /// # Returns
    /// `true` if the message was accepted by the messaging API
    async fn notify(&self, message: &str) -> bool;
}

/// Sends notifications to one fixed chat
pub struct ChatNotifier {
    sender: Arc<dyn MessageSender>,
    chat_id: String,
}

impl ChatNotifier {
    /// Creates a notifier bound to a chat
    ///
    /// # Arguments
    /// * `sender` - Messaging capability (Telegram in production)
    /// * `chat_id` - Destination chat identifier
    pub fn new(sender: Arc<dyn MessageSender>, chat_id: impl Into<String>) -> Self {
        Self {
            sender,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl NotificationService for ChatNotifier {
    async fn notify(&self, message: &str) -> bool {
        info!("Sending message: {}", message);

        match self.sender.send_message(&self.chat_id, message).await {
            Ok(()) => {
                debug!("Message delivered to chat {}", self.chat_id);
                true
            }
            Err(e) => {
                error!("Message not delivered: {}", e);
                false
            }
        }
    }
}
