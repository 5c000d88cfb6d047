//! Verdict HTTP Clients
//!
//! Typed HTTP clients for the two remote services the watcher talks to:
//! - The homework review API, queried for status changes
//! - The Telegram Bot API, used to deliver notifications
//!
//! Each client sits behind an async trait (`ReviewApi`, `MessageSender`) so
//! the poll loop can be driven by in-memory fakes in tests.
//!
//! # Example
//!
//! ```no_run
//! use verdict_client::{ReviewApi, ReviewClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), verdict_client::ApiError> {
//!     let client = ReviewClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "token",
//!     );
//!
//!     let payload = client.homework_statuses(0).await?;
//!     println!("{}", payload);
//!     Ok(())
//! }
//! ```

pub mod error;
mod review;
mod telegram;

// Re-export commonly used types
pub use error::{ApiError, DeliveryError, truncate_chars};
pub use review::{ReviewApi, ReviewClient};
pub use telegram::{MessageSender, TelegramClient};

use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with an upper bound on each request
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}
