//! Logging setup for the provider.
//!
//! All logs are written to **stderr**: stdout carries the plugin handshake
//! line and nothing else may be printed there.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: full `tracing` filter directives (e.g. `terraform_provider_pingdom=debug`)
//! - `TF_LOG_PROVIDER`, then `TF_LOG`: Terraform log levels (`TRACE`, `DEBUG`,
//!   `INFO`, `WARN`, `ERROR`, `OFF`; `JSON` means `TRACE`), used when `RUST_LOG`
//!   is unset
//!
//! ```bash
//! TF_LOG=DEBUG terraform plan
//! RUST_LOG=terraform_provider_pingdom=trace,reqwest=debug terraform plan
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Map a Terraform `TF_LOG` value to a `tracing` level directive.
pub fn tf_log_directive(value: &str) -> Option<&'static str> {
    match value.trim().to_ascii_uppercase().as_str() {
        "TRACE" | "JSON" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARN" => Some("warn"),
        "ERROR" => Some("error"),
        "OFF" => Some("off"),
        _ => None,
    }
}

fn filter_from(rust_log: Option<&str>, tf_log: Option<&str>, default_level: &str) -> EnvFilter {
    if let Some(directives) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    match tf_log.and_then(tf_log_directive) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::new(default_level),
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let tf_log = std::env::var("TF_LOG_PROVIDER")
        .or_else(|_| std::env::var("TF_LOG"))
        .ok();
    filter_from(rust_log.as_deref(), tf_log.as_deref(), default_level)
}

fn subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(env_filter(default_level)).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Initialize the global subscriber at `info` unless the environment says otherwise.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default(DEFAULT_LEVEL);
}

/// Like [`init_logging`], with a custom fallback level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize logging, returning `false` if a subscriber was already set.
pub fn try_init_logging() -> bool {
    subscriber(DEFAULT_LEVEL).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_tf_log_directive() {
        assert_eq!(tf_log_directive("DEBUG"), Some("debug"));
        assert_eq!(tf_log_directive(" warn "), Some("warn"));
        assert_eq!(tf_log_directive("JSON"), Some("trace"));
        assert_eq!(tf_log_directive("verbose"), None);
    }

    #[test]
    fn test_rust_log_wins() {
        let filter = filter_from(Some("error"), Some("TRACE"), "info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_tf_log_fallback() {
        let filter = filter_from(None, Some("DEBUG"), "info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = filter_from(Some("  "), Some("trace"), "info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_default_level() {
        let filter = filter_from(None, Some("nonsense"), "warn");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_try_init_is_idempotent() {
        try_init_logging();
        assert!(!try_init_logging());
    }
}
