//! # Tracing Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//!
//! The orchestrator itself only emits `tracing` events; installing a subscriber
//! is left to the application. `init_structured_logging` is the default choice
//! for binaries and tests that have no subscriber of their own:
//!
//! - Console-only output (container-friendly)
//! - Level from `LOG_LEVEL` / `RUST_LOG`, else from `TASKER_ENV` / `APP_ENV`
//! - TTY-aware ANSI color output
//! - Safe to call repeatedly or after another subscriber was installed

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::constants::env::{APP_ENVIRONMENT, ENVIRONMENT};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with environment-specific configuration
pub fn init_structured_logging() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(use_ansi)
            .with_filter(EnvFilter::new(&log_level));

        let subscriber = tracing_subscriber::registry().with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

/// Initialize JSON logging for log shippers
///
/// Same level resolution as [`init_structured_logging`]; the two share one
/// initialization guard, so whichever runs first wins.
pub fn init_json_logging() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(EnvFilter::new(&log_level));

        if tracing_subscriber::registry()
            .with(json_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    resolve_environment(
        std::env::var(ENVIRONMENT).ok(),
        std::env::var(APP_ENVIRONMENT).ok(),
    )
}

/// Get log level based on environment variables or environment defaults
fn get_log_level(environment: &str) -> String {
    resolve_log_level(
        std::env::var("LOG_LEVEL").ok(),
        std::env::var("RUST_LOG").ok(),
        environment,
    )
}

fn resolve_environment(tasker_env: Option<String>, app_env: Option<String>) -> String {
    tasker_env
        .or(app_env)
        .unwrap_or_else(|| "development".to_string())
}

fn resolve_log_level(
    log_level: Option<String>,
    rust_log: Option<String>,
    environment: &str,
) -> String {
    log_level
        .or(rust_log)
        .map(|level| level.to_lowercase())
        .unwrap_or_else(|| default_level_for(environment).to_string())
}

fn default_level_for(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}
