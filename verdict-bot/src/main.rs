//! Verdict Bot
//!
//! A long-running watcher that relays homework review status changes to a
//! Telegram chat.
//!
//! Architecture:
//! - Configuration: CLI flags backed by environment variables (and `.env`)
//! - Clients: review API and Telegram Bot API, from `verdict-client`
//! - Services: best-effort chat notifications
//! - Scheduler: the poll loop, which never stops once started
//!
//! The only fatal condition is a missing credential at startup; after that
//! every failure is reported to the chat and polling continues.

mod config;
mod error;
mod scheduler;
mod service;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{
    Config, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_PERIOD_SECS,
};
use crate::scheduler::StatusPoller;
use crate::service::{ChatNotifier, NotificationService};
use verdict_client::{ReviewClient, TelegramClient, http_client};
use verdict_core::PollCursor;

#[derive(Parser, Debug)]
#[command(name = "verdict-bot")]
#[command(about = "Relays homework review status changes to Telegram", long_about = None)]
struct Cli {
    /// OAuth token for the review API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    /// Chat that receives the notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,

    /// Homework statuses endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seconds to wait after each poll
    #[arg(long, env = "RETRY_PERIOD", default_value_t = DEFAULT_RETRY_PERIOD_SECS)]
    retry_period: u64,

    /// Seconds before an HTTP request is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout: u64,

    /// Also write logs to this file
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Run a single poll and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref())?;

    info!("Starting Verdict Bot");

    let config = load_config(&cli)?;
    info!(
        "Loaded configuration: endpoint={}, chat_id={}, retry_period={:?}",
        config.endpoint, config.telegram_chat_id, config.retry_period
    );

    let http = http_client(config.request_timeout).context("Failed to build HTTP client")?;
    let api = Arc::new(ReviewClient::with_client(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        http.clone(),
    ));
    let telegram = Arc::new(TelegramClient::with_client(
        config.telegram_token.clone(),
        http,
    ));
    let notifier: Arc<dyn NotificationService> =
        Arc::new(ChatNotifier::new(telegram, config.telegram_chat_id.clone()));

    let mut poller = StatusPoller::new(api, notifier, PollCursor::now(), config.retry_period);

    if cli.once {
        let outcome = poller.tick().await;
        info!(
            "Single poll finished: {:?}, next from_date would be {}",
            outcome,
            poller.cursor()
        );
        return Ok(());
    }

    poller.run().await;

    Ok(())
}

/// Sets up stdout logging, plus a plain-text file copy when requested
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verdict_bot=debug,verdict_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// Builds the configuration, halting on missing credentials
///
/// No client is created and no poll is attempted when this fails.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match Config::from_credentials(
        cli.practicum_token.clone(),
        cli.telegram_token.clone(),
        cli.telegram_chat_id.clone(),
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("Stopping: {}", e);
            return Err(e.into());
        }
    };

    let config = config
        .with_endpoint(cli.endpoint.clone())
        .with_retry_period(Duration::from_secs(cli.retry_period))
        .with_request_timeout(Duration::from_secs(cli.request_timeout));

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// Parses flags only; environment variables of the test process are ignored
    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["verdict-bot"];
        argv.extend_from_slice(args);

        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(argv)
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_config_from_flags() {
        let cli = cli(&[
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "42",
            "--endpoint",
            "http://localhost:8080/statuses/",
            "--retry-period",
            "5",
            "--request-timeout",
            "2",
        ]);

        let config = load_config(&cli).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/statuses/");
        assert_eq!(config.retry_period, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_load_config_rejects_empty_credential() {
        let cli = cli(&[
            "--practicum-token",
            "",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "42",
        ]);

        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("PRACTICUM_TOKEN"));
    }

    #[test]
    fn test_load_config_rejects_missing_credentials() {
        let cli = cli(&["--telegram-token", "t"]);

        let err = load_config(&cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = cli(&[
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "42",
        ]);

        let config = load_config(&cli).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            config.retry_period,
            Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS)
        );
        assert!(cli.log_file.is_none());
        assert!(!cli.once);
    }

    #[test]
    fn test_load_config_rejects_zero_period() {
        let cli = cli(&[
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "42",
            "--retry-period",
            "0",
        ]);

        assert!(load_config(&cli).is_err());
    }
}
