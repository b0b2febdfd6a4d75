//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Levels come from the `RUST_LOG` env var (default `info`). Records from
/// the `log` facade used by the table engine are forwarded to the same
/// subscriber.
///
/// # Example
///
/// ```no_run
/// use ht_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));

    // Console layer for development
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a completed table command with structured fields
pub fn log_table_command(table_id: i64, command: &str, outcome: &str) {
    tracing::info!(
        table_id = table_id,
        command = command,
        outcome = outcome,
        "Table command handled"
    );
}
