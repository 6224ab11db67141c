//! Log subscriber setup.
//!
//! Library code only emits `tracing` events; the binary decides whether and
//! how they are printed.

use harvester::Settings;
use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Map a configured level name to a `tracing` directive.
///
/// Accepts the `WARNING` and `CRITICAL` spellings. Unknown names fall back
/// to `info`.
#[must_use]
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" | "NOTSET" => "trace",
        "DEBUG" => "debug",
        "WARN" | "WARNING" => "warn",
        "ERROR" | "CRITICAL" | "FATAL" => "error",
        "OFF" => "off",
        _ => "info",
    }
}

/// Filter to install, or `None` when logging stays off.
///
/// Command-line flags take precedence over `RUST_LOG`, which takes
/// precedence over the configured level.
#[must_use]
pub fn filter_directive(
    settings: &Settings,
    verbosity: Verbosity,
    rust_log: Option<&str>,
) -> Option<String> {
    match verbosity {
        Verbosity::Quiet => Some("error".to_string()),
        Verbosity::Verbose => Some("debug".to_string()),
        Verbosity::Debug => Some("trace".to_string()),
        Verbosity::Normal if !settings.telemetry_enabled => None,
        Verbosity::Normal => Some(rust_log.filter(|s| !s.trim().is_empty()).map_or_else(
            || level_directive(&settings.telemetry_log_level).to_string(),
            str::to_string,
        )),
    }
}

/// Install the global stderr subscriber
pub fn init(settings: &Settings, verbosity: Verbosity, ansi: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let Some(directive) = filter_directive(settings, verbosity, rust_log.as_deref()) else {
        return;
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    tracing::debug!(%directive, "logging initialised");
}
