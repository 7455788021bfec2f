//! Structured logging configuration.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging on stderr
///
/// Log levels come from `RUST_LOG`; the default keeps command output on stdout
/// clean and only reports warnings. Records emitted through the `log` facade
/// by the tournament library are forwarded into the same subscriber.
///
/// # Example
///
/// ```no_run
/// swiss_cli::logging::init();
/// tracing::info!("Starting");
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sqlx=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log a finished command with its duration
pub fn log_command(command: &str, elapsed: Duration, succeeded: bool) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    if !succeeded {
        tracing::warn!(command = command, duration_ms = duration_ms, "Command failed");
    } else if duration_ms > 1000 {
        tracing::warn!(
            command = command,
            duration_ms = duration_ms,
            "PERFORMANCE: Slow command"
        );
    } else {
        tracing::debug!(command = command, duration_ms = duration_ms, "Command finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_command() {
        // Just ensure it doesn't panic without a subscriber
        log_command("standings", Duration::from_millis(5), true);
        log_command("pairings", Duration::from_secs(2), true);
        log_command("report", Duration::from_millis(3), false);
        log_command("count", Duration::MAX, true);
    }
}
