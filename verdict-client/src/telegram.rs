//! Telegram Bot API client
//!
//! Only `sendMessage` is used. The API wraps every answer in an envelope
//! `{ "ok": bool, "description": "...", ... }`; a message counts as delivered
//! when the status is a success and `ok` is true.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DeliveryError;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Capability to deliver a text message to a chat
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `text` to the chat identified by `chat_id`
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

/// HTTP client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    base_url: String,
    token: String,
    client: Client,
}

impl TelegramClient {
    /// Create a new Telegram client for the given bot token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_client(token, Client::new())
    }

    /// Create a new Telegram client with a custom HTTP client
    pub fn with_client(token: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            client,
        }
    }

    /// Points the client at another Bot API server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL of the Bot API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

// The token is part of every request URL; keep it out of debug output.
impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        let envelope = serde_json::from_str::<ApiEnvelope>(&body);

        if !status.is_success() {
            let description = match envelope {
                Ok(ApiEnvelope {
                    description: Some(description),
                    ..
                }) => description,
                _ => body,
            };
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description,
            });
        }

        match envelope {
            Ok(ApiEnvelope { ok: true, .. }) => {
                debug!("Telegram accepted message for chat {}", chat_id);
                Ok(())
            }
            Ok(ApiEnvelope { description, .. }) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "ok is false".to_string()),
            }),
            Err(e) => Err(DeliveryError::InvalidBody(e.to_string())),
        }
    }
}
