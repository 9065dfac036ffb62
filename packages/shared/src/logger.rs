//! Logging setup utilities for the Sketchroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crates of the workspace and the binary itself.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "sketchroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use sketchroom_shared::logger::setup_logger;
///
/// setup_logger("sketchroom-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let crates = [
        "sketchroom_shared",
        "sketchroom_server",
        "sketchroom_client",
        "tower_http",
    ];
    let mut directives: Vec<String> = crates
        .iter()
        .map(|name| format!("{}={}", name, default_log_level))
        .collect();
    directives.push(format!(
        "{}={}",
        binary_name.replace('-', "_"),
        default_log_level
    ));
    directives.join(",")
}
