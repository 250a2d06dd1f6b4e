//! Logging configuration and initialization
//!
//! The library itself only emits `tracing` events (the codec warns about
//! misuse of the writer contract and logs rejected input at debug level).
//! This module installs a `tracing-subscriber` pipeline so an application
//! can see them.
//!
//! # Usage Pattern
//!
//! Initialize logging once at application startup:
//!
//! ```rust,no_run
//! use leanrpc_core::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new()
//!     .with_log_level("leanrpc_core=debug")
//!     .with_json(true);
//!
//! leanrpc_core::init_observability(config).expect("Failed to init logging");
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level filter (e.g., "info", "leanrpc_core=trace")
//! - `LEANRPC_LOG_FORMAT`: set to `json` for structured JSON output

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
///
/// # Defaults
///
/// - Log level: from `RUST_LOG`, or "info"
/// - JSON output: when `LEANRPC_LOG_FORMAT` is `json`
/// - Targets shown
///
/// # Examples
///
/// ```rust
/// use leanrpc_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::new()
///     .with_log_level("debug")
///     .with_target(false);
/// assert_eq!(config.log_level, "debug");
/// ```
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter directives, in `EnvFilter` syntax
    ///
    /// Standard levels are "error", "warn", "info", "debug" and "trace";
    /// per-target directives such as "leanrpc_core::codec=trace" also work.
    pub log_level: String,

    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,

    /// Include the module path of each event
    pub with_target: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: std::env::var("LEANRPC_LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            with_target: true,
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration from the environment defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter directives
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch between JSON and plain text output
    pub fn with_json(mut self, enable: bool) -> Self {
        self.json = enable;
        self
    }

    /// Show or hide event targets
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }
}

/// Install the global `tracing` subscriber
///
/// Call this **once**, before any other code logs.
///
/// # Errors
///
/// - The filter directives in `log_level` do not parse
/// - A global subscriber is already installed
pub fn init_observability(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.log_level)?;

    if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_line_number(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(config.with_target);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::debug!(
        log_level = %config.log_level,
        json = config.json,
        "Logging initialized"
    );

    Ok(())
}
