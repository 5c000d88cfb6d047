//! Homework review API client
//!
//! A single endpoint: `GET <endpoint>?from_date=<epoch seconds>` with an
//! `Authorization: OAuth <token>` header. The decoded JSON is returned as-is;
//! checking its shape is the caller's job.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ApiError, MAX_ERROR_BODY_CHARS, truncate_chars};

/// Source of homework status changes
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetches status changes that happened at or after `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Lower bound of the query window, epoch seconds
    ///
    /// # Returns
    /// The decoded JSON body of a 200 OK response
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ApiError>;
}

/// HTTP client for the homework statuses endpoint
#[derive(Debug, Clone)]
pub struct ReviewClient {
    /// Full URL of the statuses endpoint
    endpoint: String,
    /// OAuth token of the student
    token: String,
    /// HTTP client instance
    client: Client,
}

impl ReviewClient {
    /// Create a new review API client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework statuses endpoint
    /// * `token` - OAuth token sent in the `Authorization` header
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new review API client with a custom HTTP client
    ///
    /// This is how request timeouts are configured.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewApi for ReviewClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, ApiError> {
        info!(
            "Requesting homework statuses: url={}, from_date={}",
            self.endpoint, from_date
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| ApiError::ConnectionFailure {
                url: self.endpoint.clone(),
                from_date,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let body = truncate_chars(&body, MAX_ERROR_BODY_CHARS);
            return Err(ApiError::InvalidResponseCode {
                url: self.endpoint.clone(),
                from_date,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|source| ApiError::InvalidBody {
                url: self.endpoint.clone(),
                from_date,
                source,
            })?;

        debug!("Homework statuses received");
        Ok(payload)
    }
}
